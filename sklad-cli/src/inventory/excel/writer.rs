//! Export merger: write barcodes and counted quantities back into a sheet of
//! the template layout
//!
//! Two phases over the original template grid (not the store-mutated data):
//! first the two output columns are cleared below the legend block, then the
//! row-group scan relocates each product by nomenclature code and writes the
//! barcode and counted quantity at both the primary and the mirror row.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Range};
use log::{debug, info};
use rust_xlsxwriter::Workbook;

use crate::inventory::error::ExportFailed;
use crate::inventory::layout::SheetLayout;
use crate::inventory::rowgroup::scan_row_groups;
use crate::inventory::types::Product;

use super::reader::first_sheet_range;

/// Merge the current product records into a copy of the template grid and
/// return the serialized workbook.
///
/// Matching is by `nomenclature_code` exclusively; names repeat in real
/// exports. Groups with no matching code, and products without a barcode,
/// stay cleared. Products absent from the template are skipped; the sheet is
/// never grown structurally.
pub fn merge_grid(
    products: &[Product],
    template: &Range<Data>,
    layout: &SheetLayout,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Copy the template. The clear phase is folded in: the two output columns
    // are never copied at or below the data offset, so stale values from a
    // previous export cannot survive.
    if let (Some(start), Some(end)) = (template.start(), template.end()) {
        for row in start.0..=end.0 {
            for col in start.1..=end.1 {
                let cleared = row >= layout.header_rows
                    && (col == layout.barcode_col || col == layout.actual_quantity_col);
                if cleared {
                    continue;
                }
                match template.get_value((row, col)) {
                    Some(Data::String(s)) => {
                        worksheet.write_string(row, col as u16, s)?;
                    }
                    Some(Data::Float(f)) => {
                        worksheet.write_number(row, col as u16, *f)?;
                    }
                    Some(Data::Int(i)) => {
                        worksheet.write_number(row, col as u16, *i as f64)?;
                    }
                    Some(Data::Bool(b)) => {
                        worksheet.write_boolean(row, col as u16, *b)?;
                    }
                    Some(Data::DateTime(dt)) => {
                        worksheet.write_number(row, col as u16, dt.as_f64())?;
                    }
                    Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => {
                        worksheet.write_string(row, col as u16, s)?;
                    }
                    _ => {}
                }
            }
        }
    }

    // Transient lookup, rebuilt per export call.
    let by_code: HashMap<&str, &Product> = products
        .iter()
        .filter(|p| !p.nomenclature_code.is_empty())
        .map(|p| (p.nomenclature_code.as_str(), p))
        .collect();

    let mut written = 0usize;
    for group in scan_row_groups(template, layout) {
        let Some(code) = group.code.as_deref() else {
            continue;
        };
        let Some(product) = by_code.get(code) else {
            continue;
        };
        if !product.has_barcode() {
            continue;
        }

        // Dual placement: the template duplicates product identity across the
        // name row and the code row, so outputs land on both.
        for row in [group.primary_row, group.mirror_row] {
            worksheet.write_string(row, layout.barcode_col as u16, &product.barcode)?;
            if let Some(quantity) = product.actual_quantity {
                worksheet.write_number(row, layout.actual_quantity_col as u16, quantity)?;
            }
        }
        written += 1;
        debug!("row {}: {} <- {}", group.primary_row, group.name, product.barcode);
    }
    info!("merged {} of {} products into template", written, products.len());

    let bytes = workbook
        .save_to_buffer()
        .context("failed to serialize merged workbook")?;
    Ok(bytes)
}

/// Merge against a template file. An unreadable template fails the export.
pub fn merge_file(products: &[Product], template_path: &Path, layout: &SheetLayout) -> Result<Vec<u8>> {
    let template = first_sheet_range(template_path).map_err(|e| ExportFailed {
        reason: format!("template {}: {}", template_path.display(), e),
    })?;
    merge_grid(products, &template, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::excel::reader::parse_grid;
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    fn put(grid: &mut Range<Data>, row: u32, col: u32, value: &str) {
        grid.set_value((row, col), Data::String(value.to_string()));
    }

    /// Two-product template with code echo rows and a grand-total block.
    fn template() -> Range<Data> {
        let mut g = Range::new((0, 0), (20, 10));
        put(&mut g, 0, 0, "Остатки товаров на складе");
        put(&mut g, 9, 0, "Молоко 1л");
        put(&mut g, 10, 1, "Кол.");
        g.set_value((10, 2), Data::Float(50.0));
        put(&mut g, 11, 0, "10234");
        put(&mut g, 13, 0, "Сахар 1кг");
        put(&mut g, 14, 1, "Кол.");
        g.set_value((14, 2), Data::Float(8.0));
        put(&mut g, 15, 0, "555");
        put(&mut g, 17, 0, "Итого");
        put(&mut g, 18, 1, "Кол.");
        g.set_value((18, 2), Data::Float(58.0));
        g
    }

    fn reopen(bytes: Vec<u8>) -> Range<Data> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        let name = workbook.sheet_names().first().cloned().unwrap();
        workbook.worksheet_range(&name).unwrap()
    }

    fn text(grid: &Range<Data>, row: u32, col: u32) -> String {
        crate::inventory::rowgroup::cell_text(grid, row, col)
    }

    #[test]
    fn writes_barcode_and_quantity_at_both_rows() {
        let mut products = parse_grid(&template(), &SheetLayout::default());
        products[0].barcode = "4600123456789".to_string();
        products[0].actual_quantity = Some(12.5);

        let out = reopen(merge_grid(&products, &template(), &SheetLayout::default()).unwrap());

        assert_eq!(text(&out, 9, 8), "4600123456789");
        assert_eq!(text(&out, 11, 8), "4600123456789");
        assert_eq!(out.get_value((9, 9)), Some(&Data::Float(12.5)));
        assert_eq!(out.get_value((11, 9)), Some(&Data::Float(12.5)));
    }

    #[test]
    fn products_without_barcode_stay_cleared() {
        // Stale values from a previous export sit in the output columns.
        let mut stale = template();
        put(&mut stale, 9, 8, "0000000000000");
        stale.set_value((9, 9), Data::Float(3.0));
        put(&mut stale, 15, 8, "0000000000000");

        let products = parse_grid(&template(), &SheetLayout::default());
        let out = reopen(merge_grid(&products, &stale, &SheetLayout::default()).unwrap());

        assert_eq!(out.get_value((9, 8)), None);
        assert_eq!(out.get_value((9, 9)), None);
        assert_eq!(out.get_value((15, 8)), None);
    }

    #[test]
    fn non_target_cells_survive_the_merge() {
        let mut products = parse_grid(&template(), &SheetLayout::default());
        products[1].barcode = "4601111111111".to_string();

        let out = reopen(merge_grid(&products, &template(), &SheetLayout::default()).unwrap());

        assert_eq!(text(&out, 0, 0), "Остатки товаров на складе");
        assert_eq!(text(&out, 13, 0), "Сахар 1кг");
        assert_eq!(out.get_value((14, 2)), Some(&Data::Float(8.0)));
        assert_eq!(out.get_value((18, 2)), Some(&Data::Float(58.0)));
    }

    #[test]
    fn unmatched_store_products_are_skipped() {
        let mut products = parse_grid(&template(), &SheetLayout::default());
        products.push(Product {
            id: 99,
            name: "Не из шаблона".to_string(),
            nomenclature_code: "99999".to_string(),
            stock_quantity: 1.0,
            barcode: "4609999999999".to_string(),
            actual_quantity: Some(1.0),
        });

        let out = reopen(merge_grid(&products, &template(), &SheetLayout::default()).unwrap());
        // The sheet kept its structure; the foreign code appears nowhere.
        for row in 0..=20 {
            assert_ne!(text(&out, row, 8), "4609999999999");
        }
    }

    #[test]
    fn round_trip_preserves_the_record_set() {
        let products = parse_grid(&template(), &SheetLayout::default());
        let out = reopen(merge_grid(&products, &template(), &SheetLayout::default()).unwrap());
        let reparsed = parse_grid(&out, &SheetLayout::default());
        assert_eq!(reparsed, products);
    }

    #[test]
    fn missing_template_fails_the_export() {
        let err = merge_file(&[], Path::new("/nonexistent/template.xls"), &SheetLayout::default())
            .unwrap_err();
        assert!(err.downcast_ref::<ExportFailed>().is_some());
    }
}
