//! Import parser: recover Product records from the raw sheet grid

use std::path::Path;

use anyhow::Result;
use calamine::{Data, Range, Reader, open_workbook_auto};
use log::info;

use crate::inventory::error::SourceUnreadable;
use crate::inventory::layout::SheetLayout;
use crate::inventory::rowgroup::scan_row_groups;
use crate::inventory::types::Product;

/// Extract products from a grid, in scan order.
///
/// Ids are the 1-based running count of emitted products, so they are dense
/// and ordering-stable for a single pass. Never fails; rows that do not match
/// the row-group shape are skipped.
pub fn parse_grid(grid: &Range<Data>, layout: &SheetLayout) -> Vec<Product> {
    scan_row_groups(grid, layout)
        .into_iter()
        .enumerate()
        .map(|(i, group)| Product {
            id: (i + 1) as i64,
            name: group.name,
            nomenclature_code: group.code.unwrap_or_default(),
            stock_quantity: group.stock_quantity,
            barcode: String::new(),
            actual_quantity: None,
        })
        .collect()
}

/// Open a spreadsheet file (legacy `.xls` or `.xlsx`) and parse its first
/// sheet. A file that cannot be opened or has no usable range fails with
/// [`SourceUnreadable`].
pub fn parse_file(path: &Path, layout: &SheetLayout) -> Result<Vec<Product>> {
    let grid = first_sheet_range(path)?;
    let products = parse_grid(&grid, layout);
    info!("parsed {} products from {}", products.len(), path.display());
    Ok(products)
}

/// First worksheet of a workbook, with all open errors mapped to
/// [`SourceUnreadable`].
pub fn first_sheet_range(path: &Path) -> Result<Range<Data>> {
    let unreadable = |reason: String| SourceUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| unreadable("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| unreadable(e.to_string()))?;
    Ok(range)
}
