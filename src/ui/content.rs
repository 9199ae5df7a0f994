//! Header and body rendering with pinned columns.
//!
//! Columns are laid out on a horizontal strip `column_width` cells apart
//! and scrolled by `scroll_x`. Pinned columns stick to their offset from
//! the viewport edge instead of scrolling away, and are painted after the
//! scrolling columns so they cover them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style as RatStyle,
    widgets::StatefulWidget,
};
use unicode_width::UnicodeWidthChar;

use crate::style::Style;
use crate::table::widths::{CELL_PADDING, HEADER_CHROME, MIN_COL_WIDTH};
use crate::table::{ColumnPin, DataTable, MeasuredWidths, SortOrder};
use crate::util::{display_width, truncate_to_width};
use super::Hit;

/// Output of a content render pass
#[derive(Debug, Clone, Default)]
pub struct ContentRecord {
    /// Width of each header cell as drawn
    pub measured: MeasuredWidths,
    /// Sort glyph regions, in paint order
    pub hits: Vec<(Rect, Hit)>,
    /// Largest useful `scroll_x` for this viewport
    pub max_scroll: u16,
    /// Width of the content area
    pub viewport: u16,
}

/// Screen column (relative to the viewport) where column `index` starts.
/// May be negative or past the viewport when the column is scrolled out.
pub fn column_x(index: usize, pin: ColumnPin, width: u16, scroll_x: u16, viewport: u16) -> i32 {
    let width = i32::from(width);
    let mut x = index as i32 * width - i32::from(scroll_x);
    if let Some(right) = pin.right {
        x = x.min(i32::from(viewport) - right as i32 - width);
    }
    if let Some(left) = pin.left {
        x = x.max(left as i32);
    }
    x
}

pub struct TableContent<'a> {
    table: &'a DataTable,
    pins: &'a [ColumnPin],
    style: &'a Style,
    column_width: u16,
    scroll_x: u16,
    focus_column: Option<usize>,
}

impl<'a> TableContent<'a> {
    pub fn new(table: &'a DataTable, pins: &'a [ColumnPin], style: &'a Style) -> Self {
        Self {
            table,
            pins,
            style,
            column_width: MIN_COL_WIDTH,
            scroll_x: 0,
            focus_column: None,
        }
    }

    pub fn column_width(mut self, width: u16) -> Self {
        self.column_width = width.max(MIN_COL_WIDTH);
        self
    }

    pub fn scroll_x(mut self, scroll_x: u16) -> Self {
        self.scroll_x = scroll_x;
        self
    }

    pub fn focus_column(mut self, column: Option<usize>) -> Self {
        self.focus_column = column;
        self
    }

    fn pin(&self, index: usize) -> ColumnPin {
        self.pins.get(index).copied().unwrap_or_default()
    }

    fn render_column(
        &self,
        index: usize,
        x: i32,
        rows: &[Vec<String>],
        area: Rect,
        buf: &mut Buffer,
        hits: &mut Vec<(Rect, Hit)>,
    ) {
        let column = &self.table.columns()[index];
        let w = self.column_width;
        let pinned = self.pin(index).is_elevated();
        let header_style = self.style.header(pinned);

        // Anything this column covers is no longer clickable
        let left = x.max(i32::from(area.x));
        let right = (x + i32::from(w)).min(i32::from(area.right()));
        hits.retain(|(r, _)| {
            let rx = i32::from(r.x);
            rx < left || rx >= right
        });

        // Header: " label↑↓ "
        let label_width = w as usize - HEADER_CHROME;
        let label = pad(&truncate_to_width(&column.header, label_width), label_width);
        let mut label_style = header_style;
        if self.focus_column == Some(index) {
            label_style = label_style.patch(self.style.focus_column());
        }
        put(buf, area, x, area.y, " ", header_style);
        put(buf, area, x + 1, area.y, &label, label_style);

        let sort = self.table.sort_state();
        for (offset, order) in [(3, SortOrder::Ascending), (2, SortOrder::Descending)] {
            let gx = x + i32::from(w) - offset;
            let active = sort.is_active(&column.accessor, order);
            let glyph_style = header_style.patch(self.style.sort_glyph(active));
            if put(buf, area, gx, area.y, order.glyph(), glyph_style) {
                hits.push((Rect::new(gx as u16, area.y, 1, 1), Hit::Sort { column: index, order }));
            }
        }
        put(buf, area, x + i32::from(w) - 1, area.y, " ", header_style);

        // Body
        let cell_style = self.style.cell(pinned);
        let value_width = w as usize - CELL_PADDING;
        for (r, row) in rows.iter().enumerate() {
            let y = area.y + 1 + r as u16;
            if y >= area.bottom() {
                break;
            }
            let text = format!(" {} ", pad(&truncate_to_width(&row[index], value_width), value_width));
            put(buf, area, x, y, &text, cell_style);
        }
    }
}

impl StatefulWidget for TableContent<'_> {
    type State = ContentRecord;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ContentRecord) {
        let column_count = self.table.column_count();
        let w = self.column_width;

        state.measured = MeasuredWidths {
            widths: vec![u32::from(w); column_count],
        };
        state.max_scroll = (column_count as u16).saturating_mul(w).saturating_sub(area.width);
        state.viewport = area.width;
        state.hits.clear();

        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows: Vec<Vec<String>> = self
            .table
            .visible_rows()
            .iter()
            .map(|row| {
                self.table
                    .columns()
                    .iter()
                    .map(|c| row.display(&c.accessor))
                    .collect()
            })
            .collect();

        // Scrolling columns first, then pinned columns on top
        let (pinned, scrolling): (Vec<usize>, Vec<usize>) =
            (0..column_count).partition(|&i| self.pin(i).is_elevated());

        for index in scrolling.into_iter().chain(pinned) {
            let x = column_x(index, self.pin(index), w, self.scroll_x, area.width);
            if x >= i32::from(area.width) || x + i32::from(w) <= 0 {
                continue;
            }
            self.render_column(index, i32::from(area.x) + x, &rows, area, buf, &mut state.hits);
        }

        if rows.is_empty() && area.height > 1 {
            put(buf, area, i32::from(area.x), area.y + 1, " No rows", self.style.message_info());
        }
    }
}

/// Pad with spaces to exactly `width` cells (input must already fit)
fn pad(s: &str, width: usize) -> String {
    let used = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Write `text` starting at absolute column `x`, dropping characters that
/// fall outside `area`. Returns true if anything was written.
fn put(buf: &mut Buffer, area: Rect, x: i32, y: u16, text: &str, style: RatStyle) -> bool {
    let mut cx = x;
    let mut wrote = false;
    for c in text.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0) as i32;
        if cx >= i32::from(area.x) && cx + cw <= i32::from(area.right()) {
            buf.set_string(cx as u16, y, c.to_string(), style);
            wrote = true;
        }
        cx += cw;
    }
    wrote
}
