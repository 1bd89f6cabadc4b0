//! Barcode assignment handlers: one-shot edits and the interactive scan loop

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Input;
use sqlx::SqlitePool;

use crate::config::repository::products;
use crate::scanner::{DecodeSource, StdinScanner};

use super::products::print_product;

pub async fn handle_assign(
    pool: &SqlitePool,
    id: i64,
    barcode: &str,
    quantity: Option<f64>,
) -> Result<()> {
    anyhow::ensure!(!barcode.trim().is_empty(), "barcode must not be empty");
    products::update_barcode_and_quantity(pool, id, barcode.trim(), quantity).await?;
    let product = products::get(pool, id).await?.context("product vanished after update")?;
    print_product(&product);
    Ok(())
}

pub async fn handle_recount(pool: &SqlitePool, id: i64, quantity: f64) -> Result<()> {
    products::update_actual_quantity(pool, id, quantity).await?;
    let product = products::get(pool, id).await?.context("product vanished after update")?;
    print_product(&product);
    Ok(())
}

pub async fn handle_unassign(pool: &SqlitePool, id: i64) -> Result<()> {
    products::clear_barcode(pool, id).await?;
    println!("{} barcode assignment for product {id}", "Removed".yellow());
    Ok(())
}

/// Interactive loop: each scanned code is matched to a product by search,
/// then saved together with an optional counted quantity.
pub async fn handle_scan(pool: &SqlitePool) -> Result<()> {
    let mut source = StdinScanner::new();
    source.start()?;
    println!("Scan a barcode and press Enter (Ctrl-D to finish).");

    while let Some(code) = source.poll()? {
        println!("{} {}", "Scanned:".green(), code);

        let product = match pick_product(pool).await? {
            Some(product) => product,
            None => continue,
        };

        let quantity: String = Input::new()
            .with_prompt("Counted quantity (empty to skip)")
            .allow_empty(true)
            .interact_text()?;
        let quantity = match quantity.trim() {
            "" => None,
            text => Some(text.parse::<f64>().context("quantity must be a number")?),
        };

        products::update_barcode_and_quantity(pool, product.id, &code, quantity).await?;
        println!("{} {} <- {}", "Saved".green(), product.name, code);
    }

    source.stop()?;
    println!("Scanning finished.");
    Ok(())
}

/// Search-and-choose dialog for one product; `None` when nothing matched.
async fn pick_product(pool: &SqlitePool) -> Result<Option<crate::inventory::Product>> {
    let query: String = Input::new()
        .with_prompt("Product name or code")
        .interact_text()?;

    let matches = products::search(pool, query.trim()).await?;
    if matches.is_empty() {
        println!("Nothing matches {:?}, rescan.", query.trim());
        return Ok(None);
    }
    if matches.len() == 1 {
        return Ok(Some(matches[0].clone()));
    }

    for product in &matches {
        print_product(product);
    }
    let id: i64 = Input::new().with_prompt("Product id").interact_text()?;
    match matches.into_iter().find(|p| p.id == id) {
        Some(product) => Ok(Some(product)),
        None => {
            println!("Id {id} is not among the matches.");
            Ok(None)
        }
    }
}
