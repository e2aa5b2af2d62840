//! Result of an extraction together with how much of the input was understood.

use super::DiffBlock;
use serde::{Deserialize, Serialize};

/// How an extraction relates to the input it was given.
///
/// An empty block list alone cannot tell "the revisions are identical" from
/// "the markup was not a diff table"; this does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// At least one row carried a recognised diff class.
    Changes,
    /// The input was blank.
    NoChanges,
    /// The input was not blank but no row looked like a diff row.
    Unrecognized,
}

/// Blocks extracted from a diff table plus the outcome classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffExtraction {
    /// Best-effort blocks, in table order.
    pub blocks: Vec<DiffBlock>,
    /// Classification of the input.
    pub outcome: ExtractionOutcome,
}

impl DiffExtraction {
    /// Extraction of a blank input.
    pub fn no_changes() -> Self {
        Self {
            blocks: Vec::new(),
            outcome: ExtractionOutcome::NoChanges,
        }
    }

    /// True if the input was understood as a diff table.
    pub fn is_recognized(&self) -> bool {
        self.outcome != ExtractionOutcome::Unrecognized
    }

    /// Consume the extraction, keeping only the blocks.
    pub fn into_blocks(self) -> Vec<DiffBlock> {
        self.blocks
    }
}
