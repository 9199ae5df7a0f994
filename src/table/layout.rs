//! Pinned (fixed) column offsets.
//!
//! Offsets are computed from a measured header cell width after a frame
//! has been drawn, so they always match what is actually on screen. Every
//! column is assumed to share the width of the first header cell.

use tracing::debug;

/// Gap added between adjacent pinned columns, except at the table edges
pub const EDGE_PADDING: u32 = 2;

/// Reports the rendered width of a column, in cells
pub trait ColumnMeasure {
    fn measure_column_width(&self, column_index: usize) -> u32;
}

/// Widths recorded by the renderer during the last draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasuredWidths {
    pub widths: Vec<u32>,
}

impl ColumnMeasure for MeasuredWidths {
    fn measure_column_width(&self, column_index: usize) -> u32 {
        self.widths.get(column_index).copied().unwrap_or(0)
    }
}

/// Same width for every column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformWidth(pub u32);

impl ColumnMeasure for UniformWidth {
    fn measure_column_width(&self, _column_index: usize) -> u32 {
        self.0
    }
}

/// Pinning applied to one column (header and every body cell)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnPin {
    /// Distance from the left edge of the viewport when left-fixed
    pub left: Option<u32>,
    /// Distance from the right edge of the viewport when right-fixed
    pub right: Option<u32>,
}

impl ColumnPin {
    pub fn is_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn is_right(&self) -> bool {
        self.right.is_some()
    }

    /// Pinned columns paint over scrolling ones
    pub fn is_elevated(&self) -> bool {
        self.is_left() || self.is_right()
    }
}

fn edge_offset(index: usize, column_count: usize) -> u32 {
    if index == 0 || index + 1 == column_count {
        0
    } else {
        EDGE_PADDING
    }
}

/// Compute pins for `column_count` columns from scratch.
///
/// A column may end up both left- and right-fixed when the two counts
/// overlap; both offsets are kept.
pub fn compute_pins(
    measure: &dyn ColumnMeasure,
    column_count: usize,
    left_fixed: usize,
    right_fixed: usize,
) -> Vec<ColumnPin> {
    let mut pins = vec![ColumnPin::default(); column_count];
    if column_count == 0 {
        return pins;
    }

    let cell_width = measure.measure_column_width(0);

    for (i, pin) in pins.iter_mut().enumerate() {
        let edge = edge_offset(i, column_count);

        if i < left_fixed {
            pin.left = Some(cell_width.saturating_mul(i as u32).saturating_add(edge));
        }

        if column_count - i <= right_fixed {
            let from_right = (column_count - i - 1) as u32;
            pin.right = Some(cell_width.saturating_mul(from_right).saturating_add(edge));
        }
    }

    pins
}

/// Inputs whose change requires a new layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutKey {
    pub column_count: usize,
    pub left_fixed: usize,
    pub right_fixed: usize,
    pub total_pages: usize,
}

/// Cached pins, refreshed after layout-affecting changes only
#[derive(Debug, Clone, Default)]
pub struct PinnedLayout {
    key: Option<LayoutKey>,
    pins: Vec<ColumnPin>,
}

impl PinnedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pins(&self) -> &[ColumnPin] {
        &self.pins
    }

    pub fn pin(&self, column_index: usize) -> ColumnPin {
        self.pins.get(column_index).copied().unwrap_or_default()
    }

    /// Force the next `refresh` to recompute, e.g. after a resize
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Recompute when `key` differs from the last pass. Returns true when
    /// the pins changed, meaning the frame should be drawn again.
    pub fn refresh(&mut self, key: LayoutKey, measure: &dyn ColumnMeasure) -> bool {
        if self.key == Some(key) {
            return false;
        }

        let pins = compute_pins(measure, key.column_count, key.left_fixed, key.right_fixed);
        debug!(
            columns = key.column_count,
            left = key.left_fixed,
            right = key.right_fixed,
            width = measure.measure_column_width(0),
            "recomputed pinned columns"
        );

        self.key = Some(key);
        let changed = pins != self.pins;
        self.pins = pins;
        changed
    }
}
