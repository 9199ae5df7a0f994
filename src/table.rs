pub mod layout;
pub mod row;
pub mod sort;
pub mod state;
pub mod widths;

pub use layout::{compute_pins, ColumnMeasure, ColumnPin, LayoutKey, MeasuredWidths, PinnedLayout};
pub use row::{CellValue, Column, Row};
pub use sort::{SortOrder, SortState};
pub use state::{DataTable, PageState, TableOptions, ViewState};
