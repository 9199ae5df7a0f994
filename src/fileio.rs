use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::table::{CellValue, Column, Row};

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Columns and rows read from a file, plus anything worth telling the user
pub struct LoadResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    pub file_path: PathBuf,
    delimiter: u8,
}

impl FileIO {
    /// An explicit delimiter wins over the one implied by the extension
    pub fn new(file_path: PathBuf, delimiter: Option<u8>) -> Self {
        let delimiter = delimiter
            .or_else(|| FileFormat::from_extension(&file_path).map(|f| f.delimiter()))
            .unwrap_or(b',');
        Self { file_path, delimiter }
    }

    pub fn delimiter_name(&self) -> String {
        match self.delimiter {
            b',' => "comma".to_string(),
            b'\t' => "tab".to_string(),
            b';' => "semicolon".to_string(),
            b'|' => "pipe".to_string(),
            other => format!("'{}'", other as char),
        }
    }

    /// Load a delimited file. The first record names the columns; numeric
    /// fields become numbers so they sort numerically.
    pub fn load(&self) -> Result<LoadResult> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let mut warnings = Vec::new();
        let headers = csv_reader.headers()?.clone();
        let columns = columns_from_headers(headers.iter(), &mut warnings);
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }

        let mut rows = Vec::new();
        let mut short_rows = 0usize;
        let mut long_rows = 0usize;

        for result in csv_reader.records() {
            let record = result?;
            if record.len() < columns.len() {
                short_rows += 1;
            } else if record.len() > columns.len() {
                long_rows += 1;
            }

            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(col, field)| (col.accessor.clone(), CellValue::parse(field)))
                .collect();
            rows.push(row);
        }

        if short_rows > 0 {
            warnings.push(format!("{} short rows left with blank cells", short_rows));
        }
        if long_rows > 0 {
            warnings.push(format!("{} rows had extra fields that were dropped", long_rows));
        }
        for w in &warnings {
            warn!(file = %self.file_path.display(), "{}", w);
        }

        info!(
            file = %self.file_path.display(),
            columns = columns.len(),
            rows = rows.len(),
            "loaded data file"
        );

        Ok(LoadResult { columns, rows, warnings })
    }
}

/// Turn header names into columns with unique, non-empty accessors
fn columns_from_headers<'a>(
    headers: impl Iterator<Item = &'a str>,
    warnings: &mut Vec<String>,
) -> Vec<Column> {
    let mut seen = HashSet::new();
    let mut renamed = false;

    let columns = headers
        .enumerate()
        .map(|(i, header)| {
            let base = if header.is_empty() {
                format!("column{}", i + 1)
            } else {
                header.to_string()
            };

            let mut accessor = base.clone();
            let mut n = 2;
            while !seen.insert(accessor.clone()) {
                accessor = format!("{}_{}", base, n);
                n += 1;
            }
            if accessor != header {
                renamed = true;
            }

            Column::new(header, accessor)
        })
        .collect();

    if renamed {
        warnings.push("Renamed blank or duplicate column headers".to_string());
    }
    columns
}
