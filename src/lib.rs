//! A terminal data table with column sorting, pagination and columns
//! pinned to the left or right edge while the rest scroll horizontally.

pub mod app;
pub mod config;
pub mod error;
pub mod fileio;
pub mod input;
pub mod mock;
pub mod mode;
pub mod style;
pub mod table;
pub mod ui;
pub mod util;

pub use error::{Error, Result};
