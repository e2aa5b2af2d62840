//! Parsers turning wiki diff markup into [`crate::model`] types.

mod dom;
mod html_table;

pub use html_table::{extract, extract_diff_blocks};

use crate::model::{DiffBlock, DiffExtraction};

/// Handle for the diff-table extractor.
///
/// Stateless; pass it to the components that need to turn compare bodies into
/// blocks instead of calling the free functions from deep inside them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffBlockExtractor;

impl DiffBlockExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract blocks and classify the input.
    pub fn extract(&self, html: &str) -> DiffExtraction {
        extract(html)
    }

    /// Extract blocks only.
    pub fn extract_blocks(&self, html: &str) -> Vec<DiffBlock> {
        extract_diff_blocks(html)
    }
}
