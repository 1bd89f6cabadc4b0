//! Generation-keyed asset cache
//!
//! Keeps remote static assets (the source spreadsheet template) available
//! offline. Assets are served cache-first and populated from the network on a
//! miss; paths carrying the API marker always bypass the cache. The cache is
//! keyed by a single generation identifier, and opening a generation deletes
//! every other one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info};

/// URLs containing this segment are never cached.
const API_MARKER: &str = "/api/";

/// Neither the cache nor the network could serve the asset.
#[derive(Debug)]
pub struct AssetUnavailable {
    pub url: String,
    pub reason: String,
}

impl std::fmt::Display for AssetUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offline and {} is not cached: {}", self.url, self.reason)
    }
}

impl std::error::Error for AssetUnavailable {}

pub struct AssetCache {
    dir: PathBuf,
}

impl AssetCache {
    /// Open the cache for one generation, deleting all others.
    pub fn open(root: &Path, generation: &str) -> Result<Self> {
        let dir = root.join(generation);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache directory {}", dir.display()))?;

        for entry in std::fs::read_dir(root)
            .with_context(|| format!("failed to read cache root {}", root.display()))?
        {
            let entry = entry?;
            if entry.path().is_dir() && entry.file_name() != generation {
                info!("deleting stale cache generation {:?}", entry.file_name());
                std::fs::remove_dir_all(entry.path())?;
            }
        }

        Ok(Self { dir })
    }

    /// Fetch a static asset cache-first, populating the cache from the
    /// network on a miss. Fails with [`AssetUnavailable`] when both miss.
    pub async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<PathBuf> {
        if url.contains(API_MARKER) {
            bail!("API paths bypass the asset cache: {url}");
        }

        let path = self.dir.join(asset_name(url));
        if path.exists() {
            debug!("cache hit for {url}");
            return Ok(path);
        }

        let unavailable = |reason: String| AssetUnavailable {
            url: url.to_string(),
            reason,
        };

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unavailable(format!("server returned {}", response.status())).into());
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        std::fs::write(&path, &bytes)
            .with_context(|| format!("failed to populate cache at {}", path.display()))?;
        info!("cached {url} ({} bytes)", bytes.len());
        Ok(path)
    }
}

/// Cache file name for a URL: its last path segment, sanitized.
fn asset_name(url: &str) -> String {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let cleaned: String = segment
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "asset".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_generation_deletes_the_others() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("v1")).unwrap();
        std::fs::write(root.path().join("v1/old.xls"), b"stale").unwrap();

        AssetCache::open(root.path(), "v2").unwrap();

        assert!(!root.path().join("v1").exists());
        assert!(root.path().join("v2").exists());
    }

    #[tokio::test]
    async fn cache_hit_does_not_touch_the_network() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::open(root.path(), "v1").unwrap();
        std::fs::write(root.path().join("v1/sample_file.xls"), b"cached bytes").unwrap();

        // Nothing is listening on port 9; a hit must never get there.
        let path = cache
            .fetch(&reqwest::Client::new(), "http://127.0.0.1:9/sample_file.xls")
            .await
            .unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"cached bytes");
    }

    #[tokio::test]
    async fn miss_plus_network_failure_is_asset_unavailable() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::open(root.path(), "v1").unwrap();

        let err = cache
            .fetch(&reqwest::Client::new(), "http://127.0.0.1:9/sample_file.xls")
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<AssetUnavailable>().is_some());
    }

    #[tokio::test]
    async fn api_paths_always_bypass_the_cache() {
        let root = tempfile::tempdir().unwrap();
        let cache = AssetCache::open(root.path(), "v1").unwrap();

        let err = cache
            .fetch(&reqwest::Client::new(), "http://127.0.0.1:9/api/export-excel")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bypass"));
    }
}
