use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::mode::Mode;
use crate::table::SortOrder;
use crate::ui::{Hit, HitMap};

/// What the user asked for, independent of how they asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollLeft,
    ScrollRight,
    ScrollHome,
    ScrollEnd,
    FocusNext,
    FocusPrev,
    /// Sort by the focused column
    SortFocused(SortOrder),
    Sort { column: usize, order: SortOrder },
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(usize),
    EditPageSize,
    PageSizeChar(char),
    PageSizeBackspace,
    CommitPageSize,
    CancelEdit,
    AdjustLeftFixed(i32),
    AdjustRightFixed(i32),
}

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn key_action(mode: Mode, key: KeyEvent) -> Option<Action> {
    match mode {
        Mode::Normal => normal_key(key),
        Mode::PageSize => page_size_key(key),
    }
}

fn normal_key(key: KeyEvent) -> Option<Action> {
    if is_escape(key) {
        return Some(Action::Quit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,

        KeyCode::Char('h') | KeyCode::Left => Action::ScrollLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::ScrollRight,
        KeyCode::Char('0') | KeyCode::Home => Action::ScrollHome,
        KeyCode::Char('$') | KeyCode::End => Action::ScrollEnd,

        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,

        KeyCode::Char('a') => Action::SortFocused(SortOrder::Ascending),
        KeyCode::Char('d') => Action::SortFocused(SortOrder::Descending),

        KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
        KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
        KeyCode::Char('g') => Action::FirstPage,
        KeyCode::Char('G') => Action::LastPage,

        KeyCode::Char('e') => Action::EditPageSize,

        KeyCode::Char('[') => Action::AdjustLeftFixed(-1),
        KeyCode::Char(']') => Action::AdjustLeftFixed(1),
        KeyCode::Char('{') => Action::AdjustRightFixed(-1),
        KeyCode::Char('}') => Action::AdjustRightFixed(1),

        _ => return None,
    };
    Some(action)
}

fn page_size_key(key: KeyEvent) -> Option<Action> {
    if is_escape(key) {
        return Some(Action::CancelEdit);
    }
    match key.code {
        KeyCode::Enter => Some(Action::CommitPageSize),
        KeyCode::Backspace => Some(Action::PageSizeBackspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageSizeChar(c)),
        _ => None,
    }
}

/// Map a mouse event against the clickable regions of the last frame
pub fn mouse_action(mouse: MouseEvent, hits: &HitMap) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let action = match hits.hit_test(mouse.column, mouse.row)? {
                Hit::Sort { column, order } => Action::Sort { column, order },
                Hit::Page(page) => Action::GoToPage(page),
                Hit::EditPageSize => Action::EditPageSize,
                Hit::CommitPageSize => Action::CommitPageSize,
            };
            Some(action)
        }
        MouseEventKind::ScrollLeft => Some(Action::ScrollLeft),
        MouseEventKind::ScrollRight => Some(Action::ScrollRight),
        // Vertical wheel scrolls horizontally; rows are paged, not scrolled
        MouseEventKind::ScrollUp => Some(Action::ScrollLeft),
        MouseEventKind::ScrollDown => Some(Action::ScrollRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_normal_keys() {
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Left)), Some(Action::ScrollLeft));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Char('l'))), Some(Action::ScrollRight));
        assert_eq!(
            key_action(Mode::Normal, key(KeyCode::Char('d'))),
            Some(Action::SortFocused(SortOrder::Descending))
        );
        assert_eq!(key_action(Mode::Normal, key(KeyCode::PageDown)), Some(Action::NextPage));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Char('G'))), Some(Action::LastPage));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Char('}'))), Some(Action::AdjustRightFixed(1)));
        assert_eq!(key_action(Mode::Normal, key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(Mode::Normal, ctrl_c), Some(Action::Quit));
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(key_action(Mode::Normal, ctrl_a), None);
    }

    #[test]
    fn test_page_size_keys() {
        assert_eq!(key_action(Mode::PageSize, key(KeyCode::Char('7'))), Some(Action::PageSizeChar('7')));
        // Letters pass through and are filtered by the draft
        assert_eq!(key_action(Mode::PageSize, key(KeyCode::Char('q'))), Some(Action::PageSizeChar('q')));
        assert_eq!(key_action(Mode::PageSize, key(KeyCode::Enter)), Some(Action::CommitPageSize));
        assert_eq!(key_action(Mode::PageSize, key(KeyCode::Esc)), Some(Action::CancelEdit));
        assert_eq!(key_action(Mode::PageSize, key(KeyCode::Backspace)), Some(Action::PageSizeBackspace));
    }

    #[test]
    fn test_escape_variants() {
        let ctrl_bracket = KeyEvent::new_with_kind(KeyCode::Char('['), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert!(is_escape(ctrl_bracket));
        assert!(!is_escape(key(KeyCode::Char('['))));
    }

    #[test]
    fn test_click_maps_hits() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 1, 1), Hit::Sort { column: 2, order: SortOrder::Ascending });
        hits.push(Rect::new(0, 5, 3, 1), Hit::Page(4));
        hits.push(Rect::new(10, 5, 6, 1), Hit::EditPageSize);

        assert_eq!(
            mouse_action(click(0, 0), &hits),
            Some(Action::Sort { column: 2, order: SortOrder::Ascending })
        );
        assert_eq!(mouse_action(click(2, 5), &hits), Some(Action::GoToPage(4)));
        assert_eq!(mouse_action(click(12, 5), &hits), Some(Action::EditPageSize));
        assert_eq!(mouse_action(click(30, 5), &hits), None);
    }

    #[test]
    fn test_wheel_scrolls_horizontally() {
        let hits = HitMap::default();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_action(wheel, &hits), Some(Action::ScrollRight));
    }
}
