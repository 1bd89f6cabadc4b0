//! Inventory round-trip core
//!
//! This module covers the spreadsheet side of the tool: parsing products out of
//! an unstructured 1C warehouse export, and merging scanned barcodes and counted
//! quantities back into a sheet of the same layout.

pub mod error;
pub mod excel;
pub mod layout;
pub mod render;
pub mod rowgroup;
pub mod types;

pub use error::{ExportFailed, SourceUnreadable};
pub use excel::{merge_file, merge_grid, parse_file, parse_grid};
pub use layout::SheetLayout;
pub use render::{LocalRenderer, RemoteRenderer, RenderOutcome, Renderer, render_with_fallback};
pub use rowgroup::{RowGroup, scan_row_groups};
pub use types::Product;
