//! Rendering the output spreadsheet: one capability, two implementations
//!
//! The backend render is preferred because it preserves the template's styles
//! exactly; the local merge is the offline fallback and only guarantees a
//! structurally valid workbook. Remote failure is an expected outcome, not an
//! error, so it is modeled as a tagged result and never surfaced to the user
//! unless the local fallback fails too.

pub mod local;
pub mod remote;

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};

pub use local::LocalRenderer;
pub use remote::RemoteRenderer;

use super::error::ExportFailed;
use super::types::Product;

/// Outcome of one render attempt.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// Ready-to-save spreadsheet bytes.
    Rendered(Vec<u8>),
    /// This renderer cannot serve the request right now (network failure,
    /// timeout, backend error). The caller may fall back.
    Unavailable { reason: String },
}

/// Turn the current product collection into spreadsheet bytes.
#[async_trait]
pub trait Renderer {
    async fn render(&self, products: &[Product]) -> Result<RenderOutcome>;
}

/// Try the remote renderer once when configured, then fall back to the local
/// merge. No remote retry happens within a single export call.
pub async fn render_with_fallback(
    remote: Option<&dyn Renderer>,
    local: &dyn Renderer,
    products: &[Product],
) -> Result<Vec<u8>> {
    if let Some(remote) = remote {
        match remote.render(products).await? {
            RenderOutcome::Rendered(bytes) => {
                info!("remote render succeeded ({} bytes)", bytes.len());
                return Ok(bytes);
            }
            RenderOutcome::Unavailable { reason } => {
                warn!("remote render unavailable ({reason}), falling back to local merge");
            }
        }
    }

    match local.render(products).await? {
        RenderOutcome::Rendered(bytes) => Ok(bytes),
        RenderOutcome::Unavailable { reason } => Err(ExportFailed { reason }.into()),
    }
}
