//! Row-group scanner shared by the import parser and the export merger
//!
//! The source sheet encodes one product across two physically adjacent rows: a
//! name row and a marker row (`"Кол."` one row below, one column right), with
//! the nomenclature code echoed two rows below the name. Both the importer and
//! the merger relocate products with this exact walk, so the heuristics live in
//! one place.

use calamine::{Data, Range};

use super::layout::SheetLayout;

/// One recognized row-group of the source grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    /// Row carrying the product name.
    pub primary_row: u32,
    /// Row two below the name, carrying the code echo; barcode and quantity
    /// are duplicated here on export.
    pub mirror_row: u32,
    /// Trimmed product name.
    pub name: String,
    /// Recovered nomenclature code, `None` when absent or non-numeric.
    pub code: Option<String>,
    /// Stock quantity from the marker row; 0 when missing or non-numeric.
    pub stock_quantity: f64,
}

/// Scan the grid for row-groups, starting below the fixed legend block.
///
/// Never fails: missing cells read as empty, rows that do not match the group
/// shape are skipped. Groups whose name is purely numeric (a code echo), empty,
/// or the grand-total marker are discarded. The scan advances two rows past an
/// emitted group and one row otherwise.
pub fn scan_row_groups(grid: &Range<Data>, layout: &SheetLayout) -> Vec<RowGroup> {
    let Some((end_row, _)) = grid.end() else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let mut row = layout.header_rows;

    // The marker row must exist, so the walk stops one row short of the end.
    while row + 1 <= end_row {
        let name = cell_text(grid, row, layout.name_col);
        let marker = cell_text(grid, row + 1, layout.marker_col);

        if marker != layout.group_marker {
            row += 1;
            continue;
        }

        let stripped: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        if is_all_digits(&stripped) || name.is_empty() || name == layout.total_marker {
            // Code echo row or grand-total row, not a product.
            row += 1;
            continue;
        }

        let mirror_row = row + layout.mirror_offset;
        let code = if mirror_row <= end_row {
            recover_code(&cell_text(grid, mirror_row, layout.name_col))
        } else {
            None
        };

        groups.push(RowGroup {
            primary_row: row,
            mirror_row,
            name,
            code,
            stock_quantity: cell_number(grid, row + 1, layout.quantity_col).unwrap_or(0.0),
        });
        row += 2;
    }

    groups
}

/// Accept a trimmed cell as a nomenclature code if its whitespace-stripped
/// form is purely numeric. The trimmed original is kept (codes may carry
/// inner digit-group spacing).
fn recover_code(text: &str) -> Option<String> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if is_all_digits(&stripped) {
        Some(text.to_string())
    } else {
        None
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Trimmed display text of a cell; absent cells read as empty.
pub(crate) fn cell_text(grid: &Range<Data>, row: u32, col: u32) -> String {
    let text = match grid.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    text.trim().to_string()
}

/// Numeric value of a cell, if it has one.
pub(crate) fn cell_number(grid: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match grid.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
