use std::io;

use thiserror::Error;

/// Errors raised while building a table or starting the viewer.
///
/// The widget itself never fails once constructed: bad page numbers,
/// page sizes and sparse rows are tolerated locally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read data file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("A table needs at least one column")]
    NoColumns,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
