//! Command-line surface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "sklad-cli",
    about = "Offline-first warehouse inventory: import a 1C spreadsheet export, scan barcodes, merge counts back",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import products from a warehouse spreadsheet export (one-time bootstrap)
    Import {
        /// Source spreadsheet (.xls or .xlsx)
        file: PathBuf,
    },
    /// List products
    List {
        /// Only products still waiting for a scan
        #[arg(long, conflicts_with = "scanned")]
        pending: bool,
        /// Only products with an assigned barcode
        #[arg(long)]
        scanned: bool,
    },
    /// Search products by name or nomenclature code
    Search { query: String },
    /// Assign a barcode (and optionally a counted quantity) to a product
    Assign {
        id: i64,
        barcode: String,
        /// Counted quantity
        #[arg(short, long)]
        quantity: Option<f64>,
    },
    /// Update the counted quantity of an already-scanned product
    Recount { id: i64, quantity: f64 },
    /// Remove a barcode assignment (also clears the counted quantity)
    Unassign { id: i64 },
    /// Interactive scanning loop: read barcodes, match products, save
    Scan,
    /// Export the inventory back into a spreadsheet of the template layout
    Export {
        /// Output file (default: updated_inventory_<date>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Template spreadsheet to merge into (overrides SKLAD_TEMPLATE)
        #[arg(long)]
        template: Option<PathBuf>,
        /// Skip the remote renderer and merge locally
        #[arg(long)]
        offline: bool,
    },
}

pub async fn dispatch(command: Commands, config: &Config, pool: &SqlitePool) -> Result<()> {
    match command {
        Commands::Import { file } => commands::import::handle_import(pool, &file).await,
        Commands::List { pending, scanned } => {
            commands::products::handle_list(pool, pending, scanned).await
        }
        Commands::Search { query } => commands::products::handle_search(pool, &query).await,
        Commands::Assign {
            id,
            barcode,
            quantity,
        } => commands::scan::handle_assign(pool, id, &barcode, quantity).await,
        Commands::Recount { id, quantity } => {
            commands::scan::handle_recount(pool, id, quantity).await
        }
        Commands::Unassign { id } => commands::scan::handle_unassign(pool, id).await,
        Commands::Scan => commands::scan::handle_scan(pool).await,
        Commands::Export {
            output,
            template,
            offline,
        } => commands::export::handle_export(config, pool, output, template, offline).await,
    }
}
