//! Single-column sorting over a row permutation

use std::cmp::Ordering;

use rayon::prelude::*;

use super::row::{compare_rows, Column, Row};

/// Threshold for using parallel processing
const PARALLEL_THRESHOLD: usize = 10_000;

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Glyph used in the header for this order
    pub fn glyph(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

/// The active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub order: SortOrder,
}

impl SortState {
    /// Initial state: first column, ascending
    pub fn initial(columns: &[Column]) -> Self {
        Self {
            column: columns.first().map(|c| c.accessor.clone()).unwrap_or_default(),
            order: SortOrder::Ascending,
        }
    }

    /// Whether a header glyph for `(accessor, order)` should be highlighted
    pub fn is_active(&self, accessor: &str, order: SortOrder) -> bool {
        self.column == accessor && self.order == order
    }
}

/// Reorder `current` (indices into `rows`) by `accessor`.
///
/// The sort is stable, so rows comparing equal keep their order from
/// `current`. Uses parallel processing for large tables.
pub fn sort_permutation(
    rows: &[Row],
    current: &[usize],
    accessor: &str,
    order: SortOrder,
) -> Vec<usize> {
    let mut indices = current.to_vec();
    let cmp_fn = |a: &usize, b: &usize| -> Ordering {
        order.apply(compare_rows(&rows[*a], &rows[*b], accessor))
    };

    if indices.len() >= PARALLEL_THRESHOLD {
        indices.par_sort_by(cmp_fn);
    } else {
        indices.sort_by(cmp_fn);
    }

    indices
}
