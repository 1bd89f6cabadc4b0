//! Remote render client
//!
//! Posts the full product collection to the backend, which merges it into the
//! original template server-side with style-perfect output. Any failure mode
//! (transport error, timeout, non-success status) maps to
//! [`RenderOutcome::Unavailable`] so the caller can fall back locally.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use crate::inventory::types::Product;

use super::{RenderOutcome, Renderer};

/// The whole remote attempt is bounded by this; past it the export falls
/// back to the local merge.
const RENDER_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RemoteRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteRenderer {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(RENDER_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Renderer for RemoteRenderer {
    async fn render(&self, products: &[Product]) -> Result<RenderOutcome> {
        let url = format!("{}/api/export-excel", self.base_url);
        debug!("requesting remote render from {url}");

        let response = match self.client.post(&url).json(products).send().await {
            Ok(response) => response,
            Err(e) => {
                return Ok(RenderOutcome::Unavailable {
                    reason: e.to_string(),
                });
            }
        };

        if !response.status().is_success() {
            return Ok(RenderOutcome::Unavailable {
                reason: format!("backend returned {}", response.status()),
            });
        }

        match response.bytes().await {
            Ok(bytes) => Ok(RenderOutcome::Rendered(bytes.to_vec())),
            Err(e) => Ok(RenderOutcome::Unavailable {
                reason: format!("failed to read backend response: {e}"),
            }),
        }
    }
}
