//! Table container: sort and pagination state plus the derived visible slice

use tracing::debug;

use crate::error::{Error, Result};
use super::row::{Column, Row};
use super::sort::{sort_permutation, SortOrder, SortState};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `row_count` rows
pub fn total_pages(row_count: usize, rows_per_page: usize) -> usize {
    row_count.div_ceil(rows_per_page.max(1))
}

/// Current page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub rows_per_page: usize,
}

impl PageState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            current_page: 1,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Move to `page`, clamped into `[1, total_pages]`
    pub fn change_page(self, page: usize, total_pages: usize) -> Self {
        Self {
            current_page: page.clamp(1, total_pages.max(1)),
            ..self
        }
    }

    /// Non-positive sizes are ignored; otherwise the page resets to 1
    pub fn change_rows_per_page(self, value: i64) -> Self {
        if value < 1 {
            return self;
        }
        Self {
            current_page: 1,
            rows_per_page: usize::try_from(value).unwrap_or(usize::MAX),
        }
    }

    /// Half-open index range of the current page within `row_count` rows
    pub fn window(&self, row_count: usize) -> (usize, usize) {
        let start = (self.current_page - 1).saturating_mul(self.rows_per_page);
        let end = start.saturating_add(self.rows_per_page);
        (start.min(row_count), end.min(row_count))
    }
}

/// Sort and pagination state as one value with pure transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sort: SortState,
    pub page: PageState,
}

impl ViewState {
    pub fn new(columns: &[Column], page_size: usize) -> Self {
        Self {
            sort: SortState::initial(columns),
            page: PageState::new(page_size),
        }
    }

    /// Record a new sort; the current page is kept
    pub fn apply_sort(&self, accessor: &str, order: SortOrder) -> Self {
        Self {
            sort: SortState {
                column: accessor.to_string(),
                order,
            },
            page: self.page,
        }
    }

    pub fn change_page(&self, page: usize, total_pages: usize) -> Self {
        Self {
            sort: self.sort.clone(),
            page: self.page.change_page(page, total_pages),
        }
    }

    pub fn change_rows_per_page(&self, value: i64) -> Self {
        Self {
            sort: self.sort.clone(),
            page: self.page.change_rows_per_page(value),
        }
    }
}

/// Construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub left_fixed_columns: usize,
    pub right_fixed_columns: usize,
    pub page_size: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            left_fixed_columns: 0,
            right_fixed_columns: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A paginated, sortable table over caller-owned rows.
///
/// Rows are never modified: sorting reorders `order`, a permutation of
/// row indices, starting from the input order.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
    order: Vec<usize>,
    view: ViewState,
    left_fixed_columns: usize,
    right_fixed_columns: usize,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, options: TableOptions) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }

        let page_size = if options.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            options.page_size
        };

        let view = ViewState::new(&columns, page_size);
        let order = (0..rows.len()).collect();

        Ok(Self {
            columns,
            rows,
            order,
            view,
            left_fixed_columns: options.left_fixed_columns,
            right_fixed_columns: options.right_fixed_columns,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in input order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn sort_state(&self) -> &SortState {
        &self.view.sort
    }

    pub fn current_page(&self) -> usize {
        self.view.page.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.view.page.rows_per_page
    }

    pub fn left_fixed_columns(&self) -> usize {
        self.left_fixed_columns
    }

    pub fn right_fixed_columns(&self) -> usize {
        self.right_fixed_columns
    }

    pub fn set_fixed_columns(&mut self, left: usize, right: usize) {
        debug!(left, right, "fixed columns changed");
        self.left_fixed_columns = left;
        self.right_fixed_columns = right;
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.rows.len(), self.view.page.rows_per_page)
    }

    /// Rows in sorted order
    pub fn sorted_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.order.iter().map(move |&i| &self.rows[i])
    }

    /// Rows on the current page, in sorted order
    pub fn visible_rows(&self) -> Vec<&Row> {
        let (start, end) = self.view.page.window(self.order.len());
        self.order[start..end].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Sort by `accessor`. Ties keep their order from the previous sort.
    pub fn handle_sort(&mut self, accessor: &str, order: SortOrder) {
        debug!(column = accessor, order = order.name(), "sort");
        self.order = sort_permutation(&self.rows, &self.order, accessor, order);
        self.view = self.view.apply_sort(accessor, order);
    }

    pub fn handle_page_change(&mut self, page: usize) {
        let total = self.total_pages();
        if page < 1 || page > total.max(1) {
            debug!(page, total, "page out of range, clamping");
        }
        self.view = self.view.change_page(page, total);
    }

    pub fn handle_rows_per_page_change(&mut self, value: i64) {
        if value < 1 {
            debug!(value, "ignoring non-positive page size");
            return;
        }
        self.view = self.view.change_rows_per_page(value);
        debug!(rows_per_page = self.view.page.rows_per_page, "page size changed");
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page() <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page() >= self.total_pages()
    }
}
