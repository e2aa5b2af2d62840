//! Wikitext Tint
//!
//! A library for tinting wikitext in an editor: links, templates, external
//! links, comments, bold and italic quotes, headings and list prefixes each get
//! their own style.
//!
//! # Example
//!
//! ```
//! use wikitext_tint::tint_wikitext;
//!
//! let runs = tint_wikitext("== Plot ==\n'''Bold''' text");
//!
//! for run in &runs {
//!     // Render run.text with run.style
//!     let _ = (&run.text, run.style.color, run.style.bold);
//! }
//! ```

pub mod markup;
mod tint;
mod types;

pub use tint::tint_wikitext;
pub use types::*;
