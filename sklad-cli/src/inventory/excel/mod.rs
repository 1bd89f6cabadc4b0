//! Spreadsheet import and export for the warehouse template

pub mod reader;
pub mod writer;

pub use reader::{parse_file, parse_grid};
pub use writer::{merge_file, merge_grid};
