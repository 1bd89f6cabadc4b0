//! Local render fallback: the offline merge against the template file

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::inventory::excel::merge_file;
use crate::inventory::layout::SheetLayout;
use crate::inventory::types::Product;

use super::{RenderOutcome, Renderer};

pub struct LocalRenderer {
    template_path: PathBuf,
    layout: SheetLayout,
}

impl LocalRenderer {
    pub fn new(template_path: PathBuf, layout: SheetLayout) -> Self {
        Self {
            template_path,
            layout,
        }
    }
}

#[async_trait]
impl Renderer for LocalRenderer {
    async fn render(&self, products: &[Product]) -> Result<RenderOutcome> {
        let bytes = merge_file(products, &self.template_path, &self.layout)?;
        Ok(RenderOutcome::Rendered(bytes))
    }
}
