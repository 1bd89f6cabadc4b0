//! Export command handler: remote-first render with local fallback

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::*;
use log::warn;
use sqlx::SqlitePool;

use crate::cache::AssetCache;
use crate::config::Config;
use crate::config::repository::products;
use crate::inventory::{LocalRenderer, RemoteRenderer, Renderer, SheetLayout, render_with_fallback};

pub async fn handle_export(
    config: &Config,
    pool: &SqlitePool,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let list = products::list_all(pool).await?;
    if list.is_empty() {
        warn!("exporting an empty store");
    }
    let scanned = list.iter().filter(|p| p.has_barcode()).count();
    println!("Exporting {} products ({} with barcodes)", list.len(), scanned);

    let remote = if offline {
        None
    } else {
        match &config.backend_url {
            Some(url) => Some(RemoteRenderer::new(url)?),
            None => None,
        }
    };

    let template_path = resolve_template(config, template).await?;
    let local = LocalRenderer::new(template_path, SheetLayout::default());

    let bytes = render_with_fallback(
        remote.as_ref().map(|r| r as &dyn Renderer),
        &local,
        &list,
    )
    .await?;

    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "updated_inventory_{}.xlsx",
            chrono::Local::now().format("%Y-%m-%d")
        ))
    });
    std::fs::write(&output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("{} {}", "Exported".green(), output.display());
    Ok(())
}

/// Template resolution order: --template flag, then SKLAD_TEMPLATE, then the
/// cached copy of SKLAD_TEMPLATE_URL.
async fn resolve_template(config: &Config, flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = &config.template_path {
        return Ok(path.clone());
    }
    if let Some(url) = &config.template_url {
        let cache = AssetCache::open(&config.cache_root, &config.cache_generation)?;
        return cache.fetch(&reqwest::Client::new(), url).await;
    }
    bail!("no template configured: pass --template, or set SKLAD_TEMPLATE / SKLAD_TEMPLATE_URL");
}
