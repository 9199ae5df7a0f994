//! Page navigation buttons and the page size editor

use ratatui::{buffer::Buffer, layout::Rect, style::Style as RatStyle, widgets::StatefulWidget};

use crate::style::Style;
use crate::util::{digits_only, display_width};
use super::Hit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButtonKind {
    Previous,
    Page(usize),
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub kind: PageButtonKind,
    pub enabled: bool,
}

impl PageButton {
    pub fn label(&self) -> String {
        match self.kind {
            PageButtonKind::Previous => "<".to_string(),
            PageButtonKind::Page(n) => n.to_string(),
            PageButtonKind::Next => ">".to_string(),
        }
    }

    /// Page this button navigates to
    pub fn target(&self, current_page: usize) -> usize {
        match self.kind {
            PageButtonKind::Previous => current_page.saturating_sub(1),
            PageButtonKind::Page(n) => n,
            PageButtonKind::Next => current_page + 1,
        }
    }

    fn width(&self) -> u16 {
        display_width(&self.label()) as u16 + 2
    }
}

/// `<`, one button per page, `>`. Boundary arrows and the current page
/// are disabled.
pub fn page_buttons(current_page: usize, total_pages: usize) -> Vec<PageButton> {
    let mut buttons = Vec::with_capacity(total_pages + 2);
    buttons.push(PageButton {
        kind: PageButtonKind::Previous,
        enabled: current_page > 1,
    });
    buttons.extend((1..=total_pages).map(|n| PageButton {
        kind: PageButtonKind::Page(n),
        enabled: n != current_page,
    }));
    buttons.push(PageButton {
        kind: PageButtonKind::Next,
        enabled: current_page < total_pages,
    });
    buttons
}

/// Page size typed by the user but not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeDraft {
    value: u64,
}

impl PageSizeDraft {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            value: rows_per_page as u64,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }

    /// Replace the field contents with `raw`. Non-digits are stripped; if
    /// nothing usable remains the previous value is kept.
    pub fn input(&mut self, raw: &str) {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return;
        }
        if let Ok(value) = digits.parse() {
            self.value = value;
        }
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.text();
        text.push(c);
        self.input(&text);
    }

    pub fn push_str(&mut self, s: &str) {
        let text = format!("{}{}", self.text(), s);
        self.input(&text);
    }

    pub fn backspace(&mut self) {
        let mut text = self.text();
        text.pop();
        self.input(&text);
    }

    /// Value handed to the table on OK
    pub fn commit_value(&self) -> i64 {
        i64::try_from(self.value).unwrap_or(i64::MAX)
    }
}

const PAGE_SIZE_LABEL: &str = "  PageSize: ";
const INPUT_WIDTH: u16 = 6;
const OK_LABEL: &str = " OK ";

pub struct Pagination<'a> {
    current_page: usize,
    total_pages: usize,
    draft: &'a PageSizeDraft,
    style: &'a Style,
    editing: bool,
}

impl<'a> Pagination<'a> {
    pub fn new(current_page: usize, total_pages: usize, draft: &'a PageSizeDraft, style: &'a Style) -> Self {
        Self {
            current_page,
            total_pages,
            draft,
            style,
            editing: false,
        }
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    fn button_style(&self, button: &PageButton) -> RatStyle {
        match button.kind {
            PageButtonKind::Page(n) if n == self.current_page => self.style.page_current(),
            _ if !button.enabled => self.style.page_disabled(),
            _ => self.style.page_button(),
        }
    }
}

/// First page button to show so that the current page fits in `budget`
/// cells alongside the arrows.
fn first_visible_page(buttons: &[PageButton], current_page: usize, budget: u16) -> usize {
    let pages = &buttons[1..buttons.len() - 1];
    let arrows = buttons[0].width() + buttons[buttons.len() - 1].width();
    if pages.is_empty() {
        return 0;
    }
    let current = current_page.clamp(1, pages.len()) - 1;

    let mut start = current;
    let mut used = arrows + pages[current].width();
    while start > 0 && used + pages[start - 1].width() <= budget {
        start -= 1;
        used += pages[start].width();
    }
    start
}

impl StatefulWidget for Pagination<'_> {
    type State = Vec<(Rect, Hit)>;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut Vec<(Rect, Hit)>) {
        hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }

        let editor_width = display_width(PAGE_SIZE_LABEL) as u16 + INPUT_WIDTH + 1 + OK_LABEL.len() as u16;
        let budget = area.width.saturating_sub(editor_width);
        let buttons = page_buttons(self.current_page, self.total_pages);
        let first_page = first_visible_page(&buttons, self.current_page, budget);

        let prev = buttons[0];
        let next = buttons[buttons.len() - 1];
        let pages = &buttons[1 + first_page..buttons.len() - 1];

        let mut x = area.x;
        let limit = area.x + budget.saturating_sub(next.width());
        let draw = |button: &PageButton, x: &mut u16, hits: &mut Vec<(Rect, Hit)>, buf: &mut Buffer| {
            let w = button.width();
            buf.set_string(*x, area.y, format!(" {} ", button.label()), self.button_style(button));
            if button.enabled {
                hits.push((
                    Rect::new(*x, area.y, w, 1),
                    Hit::Page(button.target(self.current_page)),
                ));
            }
            *x += w;
        };

        draw(&prev, &mut x, hits, buf);
        for button in pages {
            if x + button.width() > limit {
                break;
            }
            draw(button, &mut x, hits, buf);
        }
        if x + next.width() <= area.right() {
            draw(&next, &mut x, hits, buf);
        }

        // Page size editor
        let x = x.max(area.x + budget);
        if x + editor_width > area.right() {
            return;
        }
        buf.set_string(x, area.y, PAGE_SIZE_LABEL, RatStyle::default());
        let input_x = x + display_width(PAGE_SIZE_LABEL) as u16;
        let text = format!("{:<width$}", self.draft.text(), width = INPUT_WIDTH as usize);
        buf.set_stringn(input_x, area.y, &text, INPUT_WIDTH as usize, self.style.page_size_input(self.editing));
        hits.push((Rect::new(input_x, area.y, INPUT_WIDTH, 1), Hit::EditPageSize));

        let ok_x = input_x + INPUT_WIDTH + 1;
        buf.set_string(ok_x, area.y, OK_LABEL, self.style.page_button());
        hits.push((Rect::new(ok_x, area.y, OK_LABEL.len() as u16, 1), Hit::CommitPageSize));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf.get(x, 0).symbol().to_string()).collect()
    }

    fn enabled(buttons: &[PageButton], kind: PageButtonKind) -> bool {
        buttons.iter().find(|b| b.kind == kind).map(|b| b.enabled).unwrap()
    }

    #[test]
    fn test_first_page_buttons() {
        let buttons = page_buttons(1, 10);
        assert_eq!(buttons.len(), 12);
        assert!(!enabled(&buttons, PageButtonKind::Previous));
        assert!(!enabled(&buttons, PageButtonKind::Page(1)));
        assert!(enabled(&buttons, PageButtonKind::Page(2)));
        assert!(enabled(&buttons, PageButtonKind::Next));
    }

    #[test]
    fn test_last_page_buttons() {
        let buttons = page_buttons(10, 10);
        assert!(enabled(&buttons, PageButtonKind::Previous));
        assert!(!enabled(&buttons, PageButtonKind::Page(10)));
        assert!(!enabled(&buttons, PageButtonKind::Next));
    }

    #[test]
    fn test_no_pages() {
        let buttons = page_buttons(1, 0);
        assert_eq!(buttons.len(), 2);
        assert!(buttons.iter().all(|b| !b.enabled));
    }

    #[test]
    fn test_button_targets() {
        let buttons = page_buttons(4, 10);
        assert_eq!(buttons[0].target(4), 3);
        assert_eq!(buttons[5].target(4), 5);
        assert_eq!(buttons[11].target(4), 5);
    }

    #[test]
    fn test_draft_strips_non_digits() {
        let mut draft = PageSizeDraft::new(10);
        draft.input("2a5");
        assert_eq!(draft.value(), 25);
        draft.input("abc");
        assert_eq!(draft.value(), 25);
        draft.input("");
        assert_eq!(draft.value(), 25);
    }

    #[test]
    fn test_draft_typing() {
        let mut draft = PageSizeDraft::new(1);
        draft.push_char('5');
        assert_eq!(draft.text(), "15");
        draft.push_char('x');
        assert_eq!(draft.text(), "15");
        draft.backspace();
        assert_eq!(draft.text(), "1");
        // Clearing the last digit leaves an empty field, which is ignored
        draft.backspace();
        assert_eq!(draft.text(), "1");
        draft.push_str("0 0");
        assert_eq!(draft.commit_value(), 100);
    }

    #[test]
    fn test_draft_overflow_ignored() {
        let mut draft = PageSizeDraft::new(10);
        draft.input(&"9".repeat(40));
        assert_eq!(draft.value(), 10);
    }

    #[test]
    fn test_draft_zero_reaches_table() {
        let mut draft = PageSizeDraft::new(10);
        draft.input("0");
        assert_eq!(draft.commit_value(), 0);
    }

    #[test]
    fn test_render_buttons_and_editor() {
        let style = Style::default();
        let draft = PageSizeDraft::new(10);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();

        Pagination::new(2, 3, &draft, &style).render(area, &mut buf, &mut hits);

        let text = line(&buf);
        assert!(text.starts_with(" <  1  2  3  > "));
        assert!(text.contains("PageSize: 10"));
        assert!(text.contains(" OK "));

        let pages: Vec<Hit> = hits.iter().map(|(_, h)| *h).filter(|h| matches!(h, Hit::Page(_))).collect();
        // Current page 2 is not clickable
        assert_eq!(pages, vec![Hit::Page(1), Hit::Page(1), Hit::Page(3), Hit::Page(3)]);
        assert!(hits.iter().any(|(_, h)| *h == Hit::CommitPageSize));
        assert!(hits.iter().any(|(_, h)| *h == Hit::EditPageSize));
    }

    #[test]
    fn test_boundary_arrows_not_clickable() {
        let style = Style::default();
        let draft = PageSizeDraft::new(10);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();

        Pagination::new(1, 1, &draft, &style).render(area, &mut buf, &mut hits);
        assert!(hits.iter().all(|(_, h)| !matches!(h, Hit::Page(_))));
    }

    #[test]
    fn test_many_pages_keep_current_visible() {
        let style = Style::default();
        let draft = PageSizeDraft::new(1);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();

        Pagination::new(80, 100, &draft, &style).render(area, &mut buf, &mut hits);

        let text = line(&buf);
        assert!(text.starts_with(" < "));
        assert!(text.contains(" 80 "));
        assert!(text.contains(" > "));
        assert!(hits.iter().any(|(_, h)| *h == Hit::Page(81)));
    }
}
