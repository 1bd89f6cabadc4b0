//! Listing and search command handlers

use anyhow::Result;
use colored::*;
use sqlx::SqlitePool;

use crate::config::repository::products;
use crate::inventory::Product;

pub async fn handle_list(pool: &SqlitePool, pending: bool, scanned: bool) -> Result<()> {
    let list = if pending {
        products::list_without_barcode(pool).await?
    } else if scanned {
        products::list_with_barcode(pool).await?
    } else {
        products::list_all(pool).await?
    };

    if list.is_empty() {
        println!("No products. Run {} first.", "sklad-cli import <file>".cyan());
        return Ok(());
    }

    for product in &list {
        print_product(product);
    }
    println!("{} products", list.len());
    Ok(())
}

pub async fn handle_search(pool: &SqlitePool, query: &str) -> Result<()> {
    let matches = products::search(pool, query).await?;
    if matches.is_empty() {
        println!("Nothing matches {:?}", query);
        return Ok(());
    }
    for product in &matches {
        print_product(product);
    }
    Ok(())
}

pub fn print_product(product: &Product) {
    let barcode = if product.has_barcode() {
        product.barcode.green()
    } else {
        "—".dimmed()
    };
    let counted = match product.actual_quantity {
        Some(q) => format!("{q}"),
        None => "—".to_string(),
    };
    println!(
        "{:>4}  {}  [{}]  stock: {}  counted: {}  barcode: {}",
        product.id,
        product.name,
        product.nomenclature_code.dimmed(),
        product.stock_quantity,
        counted,
        barcode,
    );
}
