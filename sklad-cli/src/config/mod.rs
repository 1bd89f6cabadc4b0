//! Tool configuration and database bootstrap
//!
//! Settings come from the environment (a `.env` file is honored via dotenvy in
//! `main`), with CLI flags overriding on top. The product store is a single
//! SQLite file under the platform data directory.

pub mod repository;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding the product store.
    pub db_path: PathBuf,
    /// Base URL of the render backend; `None` means offline-only.
    pub backend_url: Option<String>,
    /// Local template spreadsheet path.
    pub template_path: Option<PathBuf>,
    /// Remote template URL, served through the asset cache when set.
    pub template_url: Option<String>,
    /// Root directory of the asset cache.
    pub cache_root: PathBuf,
    /// Cache generation; bumping it invalidates previously cached assets.
    pub cache_generation: String,
}

impl Config {
    /// Assemble configuration from the environment.
    pub fn load() -> Result<Self> {
        let data_dir = data_dir()?;
        let db_path = match std::env::var("SKLAD_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => data_dir.join("sklad.db"),
        };

        Ok(Self {
            db_path,
            backend_url: std::env::var("SKLAD_BACKEND_URL").ok().filter(|s| !s.is_empty()),
            template_path: std::env::var("SKLAD_TEMPLATE").ok().map(PathBuf::from),
            template_url: std::env::var("SKLAD_TEMPLATE_URL").ok().filter(|s| !s.is_empty()),
            cache_root: data_dir.join("cache"),
            cache_generation: std::env::var("SKLAD_CACHE_GENERATION")
                .unwrap_or_else(|_| "v1".to_string()),
        })
    }
}

/// Platform data directory for this tool.
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine the platform data directory")?;
    Ok(base.join("sklad"))
}

/// Open (creating if needed) the product store and apply the schema.
pub async fn open_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open product store {}", db_path.display()))?;

    apply_schema(&pool).await?;
    Ok(pool)
}

/// Create the product table if it does not exist yet.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            nomenclature_code TEXT NOT NULL DEFAULT '',
            stock_quantity REAL NOT NULL DEFAULT 0,
            barcode TEXT NOT NULL DEFAULT '',
            actual_quantity REAL
        )",
    )
    .execute(pool)
    .await
    .context("failed to create products table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_barcode ON products(barcode)")
        .execute(pool)
        .await
        .context("failed to create barcode index")?;

    Ok(())
}
