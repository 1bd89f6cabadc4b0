//! Import command handler

use std::path::Path;

use anyhow::Result;
use colored::*;
use sqlx::SqlitePool;

use crate::config::repository::products;
use crate::inventory::{SheetLayout, parse_file};

/// Parse the source spreadsheet and bootstrap the store. Safe to re-run: a
/// non-empty store is never overwritten.
pub async fn handle_import(pool: &SqlitePool, file: &Path) -> Result<()> {
    let parsed = parse_file(file, &SheetLayout::default())?;
    if parsed.is_empty() {
        println!(
            "{} no products recognized in {}",
            "warning:".yellow(),
            file.display()
        );
        return Ok(());
    }

    if products::initialize(pool, &parsed).await? {
        println!(
            "{} {} products from {}",
            "Imported".green(),
            parsed.len(),
            file.display()
        );
    } else {
        let existing = products::count(pool).await?;
        println!(
            "Store already contains {existing} products; import skipped (use a fresh database to re-import)"
        );
    }
    Ok(())
}
