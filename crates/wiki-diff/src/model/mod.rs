//! Data models for diff representation.

mod diff;
mod outcome;

pub use diff::{
    DiffBlock, DiffContentSpan, DiffLine, DiffRow, DiffRowContentType, DiffRowMarker, DiffSide,
};
pub use outcome::{DiffExtraction, ExtractionOutcome};
