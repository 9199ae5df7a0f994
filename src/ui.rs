pub mod content;
pub mod pagination;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, MessageKind};
use crate::table::{MeasuredWidths, SortOrder};
use content::{ContentRecord, TableContent};
use pagination::Pagination;

/// Something clickable on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A header sort glyph
    Sort { column: usize, order: SortOrder },
    /// A page button; the target page is resolved at draw time
    Page(usize),
    /// The page size field
    EditPageSize,
    /// The OK button next to the page size field
    CommitPageSize,
}

/// Clickable regions from the last frame, in paint order
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    zones: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, hit: Hit) {
        self.zones.push((rect, hit));
    }

    pub fn extend(&mut self, zones: impl IntoIterator<Item = (Rect, Hit)>) {
        self.zones.extend(zones);
    }

    /// Topmost zone containing the cell, if any
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        self.zones
            .iter()
            .rev()
            .find(|(r, _)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .map(|(_, hit)| *hit)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// What the app needs to know about the frame it just drew
#[derive(Debug, Clone, Default)]
pub struct FrameRecord {
    pub measured: MeasuredWidths,
    pub hits: HitMap,
    pub max_scroll: u16,
    pub viewport: u16,
}

pub fn render(frame: &mut Frame, app: &App) -> FrameRecord {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let mut record = FrameRecord::default();

    let content = render_table(frame, app, chunks[0]);
    record.measured = content.measured;
    record.max_scroll = content.max_scroll;
    record.viewport = content.viewport;
    record.hits.extend(content.hits);

    let mut pager_hits = Vec::new();
    let pager = Pagination::new(
        app.table.current_page(),
        app.table.total_pages(),
        &app.draft,
        &app.style,
    )
    .editing(app.is_editing_page_size());
    frame.render_stateful_widget(pager, chunks[1], &mut pager_hits);
    record.hits.extend(pager_hits);

    render_status_bar(frame, app, chunks[2]);
    render_message(frame, app, chunks[3]);

    record
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) -> ContentRecord {
    let title = format!(
        " {} rows, page {} of {} ",
        app.table.row_count(),
        app.table.current_page(),
        app.table.total_pages().max(1)
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = TableContent::new(&app.table, app.layout.pins(), &app.style)
        .column_width(app.column_width)
        .scroll_x(app.scroll_x)
        .focus_column(Some(app.focus_column));

    let mut record = ContentRecord::default();
    frame.render_stateful_widget(content, inner, &mut record);
    record
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let sort = app.table.sort_state();
    let sort_label = app
        .table
        .columns()
        .iter()
        .find(|c| c.accessor == sort.column)
        .map(|c| c.header.as_str())
        .unwrap_or(sort.column.as_str());

    let details = format!(
        " sort: {} {}  pinned: {} left, {} right  page size: {} ",
        sort_label,
        sort.order.glyph(),
        app.table.left_fixed_columns(),
        app.table.right_fixed_columns(),
        app.table.rows_per_page(),
    );

    let status = Line::from(vec![
        Span::styled(format!(" {} ", app.mode.display_name()), app.style.status_mode(&app.mode)),
        Span::raw(details),
    ]);

    frame.render_widget(Paragraph::new(status).style(app.style.status_bar()), area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.message {
        Some((MessageKind::Error, msg)) => Line::styled(msg.clone(), app.style.message_error()),
        Some((MessageKind::Info, msg)) => Line::styled(msg.clone(), app.style.message_info()),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 1), Hit::Page(1));
        hits.push(Rect::new(5, 0, 2, 1), Hit::Page(2));

        assert_eq!(hits.hit_test(1, 0), Some(Hit::Page(1)));
        assert_eq!(hits.hit_test(5, 0), Some(Hit::Page(2)));
        assert_eq!(hits.hit_test(7, 0), Some(Hit::Page(1)));
        assert_eq!(hits.hit_test(10, 0), None);
        assert_eq!(hits.hit_test(1, 1), None);
    }
}
