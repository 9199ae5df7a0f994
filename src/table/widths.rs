use rayon::prelude::*;

use crate::util::display_width;
use super::row::{Column, Row};

/// Threshold for using parallel processing (rows * cols)
const PARALLEL_THRESHOLD: usize = 10_000;

/// Smallest column: a leading space, one character, both glyphs and a gap
pub const MIN_COL_WIDTH: u16 = 6;

/// Cells taken by the sort glyphs and padding around a header label
pub const HEADER_CHROME: usize = 4;

/// Cells of padding around a body value
pub const CELL_PADDING: usize = 2;

/// One shared width for every column, wide enough for the widest header
/// and value and clamped to `[MIN_COL_WIDTH, max_col_width]`.
pub fn uniform_column_width(columns: &[Column], rows: &[Row], max_col_width: u16) -> u16 {
    let header = columns
        .iter()
        .map(|c| display_width(&c.header) + HEADER_CHROME)
        .max()
        .unwrap_or(0);

    let row_width = |row: &Row| -> usize {
        columns
            .iter()
            .map(|c| display_width(&row.display(&c.accessor)))
            .max()
            .unwrap_or(0)
    };

    let body = if rows.len() * columns.len() >= PARALLEL_THRESHOLD {
        rows.par_iter().map(row_width).max().unwrap_or(0)
    } else {
        rows.iter().map(row_width).max().unwrap_or(0)
    };

    let wanted = header.max(body + CELL_PADDING);
    let max = max_col_width.max(MIN_COL_WIDTH);
    (wanted.min(max as usize) as u16).max(MIN_COL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_drives_width() {
        let columns = vec![Column::new("Description", "d")];
        let rows = vec![Row::new().with("d", "x")];
        assert_eq!(uniform_column_width(&columns, &rows, 30), 15);
    }

    #[test]
    fn test_body_drives_width() {
        let columns = vec![Column::new("A", "a"), Column::new("B", "b")];
        let rows = vec![Row::new().with("a", "short").with("b", "a much longer value")];
        assert_eq!(uniform_column_width(&columns, &rows, 30), 21);
    }

    #[test]
    fn test_clamped() {
        let columns = vec![Column::new("A", "a")];
        let rows = vec![Row::new().with("a", "x".repeat(100))];
        assert_eq!(uniform_column_width(&columns, &rows, 20), 20);
        assert_eq!(uniform_column_width(&columns, &[], 30), MIN_COL_WIDTH);
        assert_eq!(uniform_column_width(&columns, &rows, 1), MIN_COL_WIDTH);
    }

    #[test]
    fn test_parallel_path_matches() {
        let columns = vec![Column::new("A", "a")];
        let mut rows: Vec<Row> = (0..PARALLEL_THRESHOLD).map(|i| Row::new().with("a", i as i64)).collect();
        rows.push(Row::new().with("a", "twelve chars"));
        assert_eq!(uniform_column_width(&columns, &rows, 30), 14);
    }
}
