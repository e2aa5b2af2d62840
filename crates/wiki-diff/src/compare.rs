//! Decoding of MediaWiki `action=compare` responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DiffBlock, DiffExtraction, DiffLine};
use crate::parser::DiffBlockExtractor;

/// Errors that can occur while decoding a compare response.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Failed to decode compare response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Wiki API error {code}: {info}")]
    Api { code: String, info: String },
    #[error("Response has no compare section")]
    MissingCompare,
}

/// Top level of a compare response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub compare: Compare,
}

/// The `compare` section: revision metadata plus the diff table body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fromtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fromrevid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torevid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tocomment: Option<String>,
    /// Diff table rows, without the `<table>` element. `formatversion=2`
    /// responses name this field `body`.
    #[serde(rename = "*", alias = "body", default)]
    pub body: String,
}

/// Shape used to look for an API error before decoding the payload.
#[derive(Deserialize)]
struct Envelope {
    error: Option<ApiError>,
    compare: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

impl CompareResponse {
    /// Decode a compare response from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, CompareError> {
        let envelope: Envelope = serde_json::from_str(json)?;
        if let Some(err) = envelope.error {
            return Err(CompareError::Api {
                code: err.code,
                info: err.info,
            });
        }

        let compare = envelope.compare.ok_or(CompareError::MissingCompare)?;
        Ok(Self {
            compare: serde_json::from_value(compare)?,
        })
    }
}

impl Compare {
    /// Wrap a raw diff table body.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Extract blocks from the body and classify it.
    pub fn extract(&self, extractor: &DiffBlockExtractor) -> DiffExtraction {
        extractor.extract(&self.body)
    }

    /// Extract blocks from the body.
    pub fn diff_blocks(&self, extractor: &DiffBlockExtractor) -> Vec<DiffBlock> {
        extractor.extract_blocks(&self.body)
    }
}

/// Split blocks into the old-side and new-side line lists.
pub fn split_sides(blocks: Vec<DiffBlock>) -> (Vec<DiffLine>, Vec<DiffLine>) {
    blocks
        .into_iter()
        .map(|block| (block.left, block.right))
        .unzip()
}
