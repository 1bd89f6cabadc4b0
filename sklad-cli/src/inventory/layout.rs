//! Positional constants of the 1C warehouse export template
//!
//! The source sheet has no headers or schema; products are recovered purely by
//! position. All offsets live here so the import parser and the export merger
//! cannot drift apart.

/// Layout of one spreadsheet template.
///
/// Defaults describe the shipped 1C stock report: a 9-row legend block, then
/// row-groups of a name row followed by a `"Кол."` marker row, with the
/// nomenclature code printed two rows below the name.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Rows 0..header_rows are a fixed legend block and are never scanned.
    pub header_rows: u32,
    /// Column of the product name on the group's first row.
    pub name_col: u32,
    /// Column holding the group marker, one row below the name.
    pub marker_col: u32,
    /// Column holding the stock quantity, one row below the name.
    pub quantity_col: u32,
    /// Distance from the name row to the mirror row carrying the code.
    pub mirror_offset: u32,
    /// Output column for barcodes.
    pub barcode_col: u32,
    /// Output column for counted quantities.
    pub actual_quantity_col: u32,
    /// Literal token that recognizes a valid row-group.
    pub group_marker: String,
    /// Literal name of the grand-total row, never a product.
    pub total_marker: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_rows: 9,
            name_col: 0,
            marker_col: 1,
            quantity_col: 2,
            mirror_offset: 2,
            barcode_col: 8,
            actual_quantity_col: 9,
            group_marker: "Кол.".to_string(),
            total_marker: "Итого".to_string(),
        }
    }
}
