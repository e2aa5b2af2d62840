//! Wikitext markup rules
//!
//! Paired markup (links, templates, external links, comments, bold, italic)
//! and line markup (headings, list and definition prefixes).

use crate::types::{Rgb, TintStyle};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

pub const LINK_COLOR: Rgb = Rgb::from_hex(0x21a3f1);
pub const TEMPLATE_COLOR: Rgb = Rgb::from_hex(0xe38a2e);
pub const EXTERNAL_LINK_COLOR: Rgb = Rgb::from_hex(0x38ad6c);
pub const COMMENT_COLOR: Rgb = Rgb::from_hex(0xbef781);
pub const HEADING_COLOR: Rgb = Rgb::from_hex(0xff0000);
pub const LIST_COLOR: Rgb = Rgb::from_hex(0x6868f2);

/// Markup with an opening and a closing token
#[derive(Debug, Clone, Copy)]
pub struct PairMarkup {
    pub open: &'static str,
    pub close: &'static str,
    pub style: TintStyle,
    /// Closing token must be on the same line as the opening one
    pub line_bound: bool,
}

/// Paired markup in matching priority: longer openers that share a prefix
/// with shorter ones come first.
pub const PAIR_MARKUP: [PairMarkup; 6] = [
    PairMarkup {
        open: "[[",
        close: "]]",
        style: TintStyle::colored(LINK_COLOR),
        line_bound: false,
    },
    PairMarkup {
        open: "{{",
        close: "}}",
        style: TintStyle::colored(TEMPLATE_COLOR),
        line_bound: false,
    },
    PairMarkup {
        open: "[http",
        close: "]",
        style: TintStyle::colored(EXTERNAL_LINK_COLOR),
        line_bound: false,
    },
    PairMarkup {
        open: "<!--",
        close: "-->",
        style: TintStyle::colored(COMMENT_COLOR),
        line_bound: false,
    },
    PairMarkup {
        open: "'''",
        close: "'''",
        style: TintStyle::PLAIN.bold(),
        line_bound: true,
    },
    PairMarkup {
        open: "''",
        close: "''",
        style: TintStyle::PLAIN.italic(),
        line_bound: true,
    },
];

/// A styled byte range produced by a line rule, relative to the line start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTint {
    pub range: Range<usize>,
    pub style: TintStyle,
}

/// Match a heading line such as `== Title ==`
///
/// Returns the styled range, or None when the line is not a heading.
/// Unbalanced runs take the shorter level (1 to 6).
pub fn match_heading(line: &str) -> Option<LineTint> {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HEADING_REGEX.get_or_init(|| {
        // Match ={1,6} content ={1,6} with optional trailing whitespace
        Regex::new(r"^(={1,6})(.+?)(={1,6})\s*$").unwrap()
    });

    // Unbalanced runs such as `=== a ==` still form a heading; the surplus
    // `=` signs on the longer side become part of the title.
    let captures = re.captures(line)?;
    let close = captures.get(3)?;

    Some(LineTint {
        range: 0..close.end(),
        style: TintStyle::colored(HEADING_COLOR).bold(),
    })
}

/// Match a list or definition prefix (`*`, `#`, `;`, possibly nested)
///
/// Returns the marker tint and the tint for the rest of the line.
pub fn match_list_item(line: &str) -> Option<(LineTint, LineTint)> {
    static LIST_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = LIST_REGEX.get_or_init(|| Regex::new(r"^[*#;]+").unwrap());

    let marker = re.find(line)?;
    let content_end = line.trim_end_matches(['\r', '\n']).len();

    Some((
        LineTint {
            range: 0..marker.end(),
            style: TintStyle::colored(LIST_COLOR).bold(),
        },
        LineTint {
            range: marker.end()..content_end.max(marker.end()),
            style: TintStyle::colored(LIST_COLOR),
        },
    ))
}

/// All line rule tints for one line (without its line break)
pub fn line_tints(line: &str) -> Vec<LineTint> {
    if let Some(heading) = match_heading(line) {
        return vec![heading];
    }

    match match_list_item(line) {
        Some((marker, content)) => vec![marker, content],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        let tint = match_heading("== History ==").unwrap();
        assert_eq!(tint.range, 0..13);
        assert!(tint.style.bold);

        assert!(match_heading("====== Deep ======").is_some());
        assert!(match_heading("Not = a heading =").is_none());
    }

    #[test]
    fn test_unbalanced_heading_uses_shorter_run() {
        let tint = match_heading("=== a ==").unwrap();
        assert_eq!(tint.range, 0..8);

        let tint = match_heading("== b ===").unwrap();
        assert_eq!(tint.range, 0..8);
        assert!(tint.style.bold);
    }

    #[test]
    fn test_heading_trailing_space_not_styled() {
        let tint = match_heading("= A =  ").unwrap();
        assert_eq!(tint.range, 0..5);
    }

    #[test]
    fn test_list_item() {
        let (marker, content) = match_list_item("**# nested item").unwrap();
        assert_eq!(marker.range, 0..3);
        assert!(marker.style.bold);
        assert_eq!(content.range, 3..15);
        assert!(!content.style.bold);
        assert_eq!(content.style.color, Some(LIST_COLOR));

        assert!(match_list_item("; term").is_some());
        assert!(match_list_item("plain * text").is_none());
    }

    #[test]
    fn test_line_tints_prefers_heading() {
        assert_eq!(line_tints("= Title =").len(), 1);
        assert_eq!(line_tints("* item").len(), 2);
        assert!(line_tints("prose").is_empty());
    }
}
