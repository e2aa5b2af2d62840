//! # wiki-diff
//!
//! Turns the HTML diff table of a MediaWiki `action=compare` response into
//! structured, display-ready [`DiffBlock`]s.
//!
//! ## Design Principles
//!
//! The crate owns no I/O. It receives the compare body as text and hands back
//! plain data, which keeps it testable without a wiki and usable from any
//! front end:
//!
//! - Extraction is pure and deterministic; the same input always yields the
//!   same blocks, in table order.
//! - Unexpected markup never fails the caller. Unclassified cells become
//!   plain, unmarked rows and missing sides become empty row lists.
//! - [`ExtractionOutcome`] tells "no changes" apart from "not a diff table".
//!
//! ## Usage
//!
//! ```rust
//! use wiki_diff::{CompareResponse, DiffBlockExtractor, ExtractionOutcome};
//!
//! let json = r#"{"compare": {"torevid": 2, "*": ""}}"#;
//! let response = CompareResponse::from_json(json)?;
//!
//! let extraction = response.compare.extract(&DiffBlockExtractor::new());
//! assert_eq!(extraction.outcome, ExtractionOutcome::NoChanges);
//! # Ok::<(), wiki_diff::CompareError>(())
//! ```

pub mod compare;
pub mod model;
pub mod palette;
pub mod parser;

pub use compare::{split_sides, Compare, CompareError, CompareResponse};
pub use model::{
    DiffBlock, DiffContentSpan, DiffExtraction, DiffLine, DiffRow, DiffRowContentType,
    DiffRowMarker, DiffSide, ExtractionOutcome,
};
pub use palette::{ColorScheme, DiffPalette, Rgba};
pub use parser::{extract, extract_diff_blocks, DiffBlockExtractor};
