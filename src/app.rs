use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::input::{key_action, mouse_action, Action};
use crate::mode::Mode;
use crate::style::Style;
use crate::table::widths::uniform_column_width;
use crate::table::{DataTable, LayoutKey, PinnedLayout, SortOrder};
use crate::ui::pagination::PageSizeDraft;
use crate::ui::{self, FrameRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

pub struct App {
    pub table: DataTable,
    pub layout: PinnedLayout,
    pub draft: PageSizeDraft,
    pub style: Style,
    pub mode: Mode,
    pub scroll_x: u16,
    pub scroll_step: u16,
    /// Shared width of every column, in cells
    pub column_width: u16,
    pub focus_column: usize,
    pub message: Option<(MessageKind, String)>,
    pub should_quit: bool,
    /// Measurements and click targets of the last frame
    pub record: FrameRecord,
}

impl App {
    pub fn new(table: DataTable, style: Style, config: &AppConfig) -> Self {
        let column_width = uniform_column_width(table.columns(), table.rows(), config.max_col_width);
        let draft = PageSizeDraft::new(table.rows_per_page());
        Self {
            table,
            layout: PinnedLayout::new(),
            draft,
            style,
            mode: Mode::Normal,
            scroll_x: 0,
            scroll_step: config.scroll_step.max(1),
            column_width,
            focus_column: 0,
            message: None,
            should_quit: false,
            record: FrameRecord::default(),
        }
    }

    pub fn is_editing_page_size(&self) -> bool {
        self.mode == Mode::PageSize
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            let mut record = FrameRecord::default();
            terminal.draw(|f| record = ui::render(f, self))?;
            self.record = record;
            self.scroll_x = self.scroll_x.min(self.record.max_scroll);

            // Pins come from widths measured on screen, so a layout change
            // needs a second frame
            if self.refresh_layout() {
                continue;
            }

            if poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.message = None;
                        if let Some(action) = key_action(self.mode, key) {
                            self.handle_action(action);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Some(action) = mouse_action(mouse, &self.record.hits) {
                            self.message = None;
                            self.handle_action(action);
                        }
                    }
                    Event::Paste(text) if self.is_editing_page_size() => {
                        self.draft.push_str(&text);
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        self.layout.invalidate();
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Recompute pins if anything they depend on changed. Returns true
    /// when the pins are different from what was last drawn.
    pub fn refresh_layout(&mut self) -> bool {
        let key = LayoutKey {
            column_count: self.table.column_count(),
            left_fixed: self.table.left_fixed_columns(),
            right_fixed: self.table.right_fixed_columns(),
            total_pages: self.table.total_pages(),
        };
        self.layout.refresh(key, &self.record.measured)
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::ScrollLeft => self.scroll_x = self.scroll_x.saturating_sub(self.scroll_step),
            Action::ScrollRight => {
                self.scroll_x = self.scroll_x.saturating_add(self.scroll_step).min(self.record.max_scroll);
            }
            Action::ScrollHome => self.scroll_x = 0,
            Action::ScrollEnd => self.scroll_x = self.record.max_scroll,

            Action::FocusNext => {
                let count = self.table.column_count();
                self.focus_column = (self.focus_column + 1) % count.max(1);
                self.scroll_to_focus();
            }
            Action::FocusPrev => {
                let count = self.table.column_count().max(1);
                self.focus_column = (self.focus_column + count - 1) % count;
                self.scroll_to_focus();
            }

            Action::SortFocused(order) => self.sort(self.focus_column, order),
            Action::Sort { column, order } => {
                self.focus_column = column;
                self.sort(column, order);
            }

            Action::NextPage => self.go_to_page(self.table.current_page() + 1),
            Action::PrevPage => self.go_to_page(self.table.current_page().saturating_sub(1)),
            Action::FirstPage => self.go_to_page(1),
            Action::LastPage => self.go_to_page(self.table.total_pages()),
            Action::GoToPage(page) => self.go_to_page(page),

            Action::EditPageSize => self.mode = Mode::PageSize,
            Action::PageSizeChar(c) => self.draft.push_char(c),
            Action::PageSizeBackspace => self.draft.backspace(),
            Action::CommitPageSize => self.commit_page_size(),
            Action::CancelEdit => {
                self.draft = PageSizeDraft::new(self.table.rows_per_page());
                self.mode = Mode::Normal;
            }

            Action::AdjustLeftFixed(delta) => {
                let left = self.adjust_count(self.table.left_fixed_columns(), delta);
                self.table.set_fixed_columns(left, self.table.right_fixed_columns());
            }
            Action::AdjustRightFixed(delta) => {
                let right = self.adjust_count(self.table.right_fixed_columns(), delta);
                self.table.set_fixed_columns(self.table.left_fixed_columns(), right);
            }
        }
    }

    fn sort(&mut self, column: usize, order: SortOrder) {
        let Some(col) = self.table.columns().get(column) else {
            return;
        };
        let header = col.header.clone();
        let accessor = col.accessor.clone();
        self.table.handle_sort(&accessor, order);
        self.message = Some((MessageKind::Info, format!("Sorted by {} {}", header, order.glyph())));
    }

    fn go_to_page(&mut self, page: usize) {
        self.table.handle_page_change(page);
    }

    /// Page sizes below 1 are dropped by the table without a message
    fn commit_page_size(&mut self) {
        let value = self.draft.commit_value();
        self.mode = Mode::Normal;
        self.table.handle_rows_per_page_change(value);
        if self.table.rows_per_page() as i64 == value {
            info!(rows_per_page = value, "page size applied");
            self.message = Some((MessageKind::Info, format!("Showing {} rows per page", value)));
        }
    }

    fn adjust_count(&self, current: usize, delta: i32) -> usize {
        let next = current as i64 + i64::from(delta);
        next.clamp(0, self.table.column_count() as i64) as usize
    }

    /// Scroll just enough to show the focused column. Pinned columns are
    /// always on screen.
    fn scroll_to_focus(&mut self) {
        let viewport = u32::from(self.record.viewport);
        if viewport == 0 || self.layout.pin(self.focus_column).is_elevated() {
            return;
        }
        let width = u32::from(self.column_width);
        let start = width * self.focus_column as u32;
        let end = start + width;
        let scroll = u32::from(self.scroll_x);

        let target = if start < scroll {
            start
        } else if end > scroll + viewport {
            end.saturating_sub(viewport).min(start)
        } else {
            return;
        };
        let target = target.min(u32::from(u16::MAX)) as u16;
        self.scroll_x = target.min(self.record.max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{mock_columns, mock_rows};
    use crate::table::{MeasuredWidths, TableOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(rows: usize) -> App {
        let mut rng = StdRng::seed_from_u64(3);
        let table = DataTable::new(mock_columns(), mock_rows(rows, &mut rng), TableOptions::default()).unwrap();
        App::new(table, Style::default(), &AppConfig::default())
    }

    #[test]
    fn test_paging_actions() {
        let mut app = app(100);
        app.handle_action(Action::PrevPage);
        assert_eq!(app.table.current_page(), 1);

        app.handle_action(Action::LastPage);
        assert_eq!(app.table.current_page(), 10);
        app.handle_action(Action::NextPage);
        assert_eq!(app.table.current_page(), 10);

        app.handle_action(Action::GoToPage(4));
        app.handle_action(Action::NextPage);
        assert_eq!(app.table.current_page(), 5);
        app.handle_action(Action::FirstPage);
        assert_eq!(app.table.current_page(), 1);
    }

    #[test]
    fn test_sort_action() {
        let mut app = app(20);
        app.handle_action(Action::Sort { column: 0, order: SortOrder::Descending });
        let first = app.table.visible_rows()[0].display("id");
        assert_eq!(first, "20");
        assert_eq!(app.focus_column, 0);
        assert!(matches!(app.message, Some((MessageKind::Info, _))));
    }

    #[test]
    fn test_page_size_edit_flow() {
        let mut app = app(100);
        app.handle_action(Action::GoToPage(3));
        app.handle_action(Action::EditPageSize);
        assert!(app.is_editing_page_size());

        app.handle_action(Action::PageSizeBackspace);
        app.handle_action(Action::PageSizeChar('5'));
        app.handle_action(Action::CommitPageSize);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.table.rows_per_page(), 15);
        assert_eq!(app.table.current_page(), 1);
        assert_eq!(app.table.total_pages(), 7);
    }

    #[test]
    fn test_zero_page_size_ignored_silently() {
        let mut app = app(100);
        app.handle_action(Action::GoToPage(4));
        app.draft.input("0");
        app.handle_action(Action::CommitPageSize);
        assert_eq!(app.table.rows_per_page(), 10);
        assert_eq!(app.table.current_page(), 4);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_cancel_edit_restores_draft() {
        let mut app = app(100);
        app.handle_action(Action::EditPageSize);
        app.handle_action(Action::PageSizeChar('0'));
        assert_eq!(app.draft.value(), 100);
        app.handle_action(Action::CancelEdit);
        assert_eq!(app.draft.value(), 10);
        assert_eq!(app.table.rows_per_page(), 10);
    }

    #[test]
    fn test_fixed_column_adjustment_clamps() {
        let mut app = app(5);
        app.handle_action(Action::AdjustLeftFixed(-1));
        assert_eq!(app.table.left_fixed_columns(), 0);
        for _ in 0..10 {
            app.handle_action(Action::AdjustRightFixed(1));
        }
        assert_eq!(app.table.right_fixed_columns(), 7);
    }

    #[test]
    fn test_scroll_clamped_to_frame() {
        let mut app = app(5);
        app.record.max_scroll = 6;
        app.handle_action(Action::ScrollRight);
        assert_eq!(app.scroll_x, 4);
        app.handle_action(Action::ScrollRight);
        assert_eq!(app.scroll_x, 6);
        app.handle_action(Action::ScrollLeft);
        assert_eq!(app.scroll_x, 2);
        app.handle_action(Action::ScrollHome);
        assert_eq!(app.scroll_x, 0);
        app.handle_action(Action::ScrollEnd);
        assert_eq!(app.scroll_x, 6);
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app(5);
        app.handle_action(Action::FocusPrev);
        assert_eq!(app.focus_column, 6);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus_column, 0);
    }

    #[test]
    fn test_focus_scrolls_only_when_off_screen() {
        let mut app = app(5);
        app.column_width = 10;
        app.record.viewport = 40;
        app.record.max_scroll = 30;

        // Columns 1 and 2 are already visible
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus_column, 2);
        assert_eq!(app.scroll_x, 0);

        // Column 5 ends at 60; scroll until its right edge shows
        for _ in 0..3 {
            app.handle_action(Action::FocusNext);
        }
        assert_eq!(app.focus_column, 5);
        assert_eq!(app.scroll_x, 20);

        // Column 4 is still visible, column 1 is not
        app.handle_action(Action::FocusPrev);
        assert_eq!(app.scroll_x, 20);
        for _ in 0..3 {
            app.handle_action(Action::FocusPrev);
        }
        assert_eq!(app.focus_column, 1);
        assert_eq!(app.scroll_x, 10);
    }

    #[test]
    fn test_pinned_focus_does_not_scroll() {
        let mut app = app(5);
        app.column_width = 10;
        app.record.viewport = 40;
        app.record.max_scroll = 30;
        app.table.set_fixed_columns(0, 1);
        app.record.measured = MeasuredWidths { widths: vec![10; 7] };
        app.refresh_layout();

        app.handle_action(Action::FocusPrev);
        assert_eq!(app.focus_column, 6);
        assert_eq!(app.scroll_x, 0);
    }

    #[test]
    fn test_layout_refresh_only_on_change() {
        let mut app = app(100);
        app.table.set_fixed_columns(2, 1);
        app.record.measured = MeasuredWidths { widths: vec![12; 7] };

        assert!(app.refresh_layout());
        assert_eq!(app.layout.pin(1).left, Some(14));
        assert!(!app.refresh_layout());

        app.handle_action(Action::AdjustLeftFixed(-1));
        assert!(app.refresh_layout());
        assert_eq!(app.layout.pin(1).left, None);
    }
}
