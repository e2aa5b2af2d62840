//! Diff data structures produced from a wiki compare table.

use serde::{Deserialize, Serialize};

/// One unit of comparison: the old (left) and new (right) side of a line group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffBlock {
    /// Old revision side.
    pub left: DiffLine,
    /// New revision side.
    pub right: DiffLine,
}

impl DiffBlock {
    /// Create a block from its two sides.
    pub fn new(left: DiffLine, right: DiffLine) -> Self {
        Self { left, right }
    }

    /// Get one side of the block.
    pub fn side(&self, side: DiffSide) -> &DiffLine {
        match side {
            DiffSide::Left => &self.left,
            DiffSide::Right => &self.right,
        }
    }

    /// Mutable access to one side, used while the block is being assembled.
    pub(crate) fn side_mut(&mut self, side: DiffSide) -> &mut DiffLine {
        match side {
            DiffSide::Left => &mut self.left,
            DiffSide::Right => &mut self.right,
        }
    }

    /// True when the old side has nothing and the new side only adds.
    pub fn is_pure_addition(&self) -> bool {
        self.left.is_empty()
            && !self.right.is_empty()
            && self.right.rows.iter().all(|r| r.marker == DiffRowMarker::Plus)
    }

    /// True when the new side has nothing and the old side only removes.
    pub fn is_pure_deletion(&self) -> bool {
        self.right.is_empty()
            && !self.left.is_empty()
            && self.left.rows.iter().all(|r| r.marker == DiffRowMarker::Minus)
    }
}

/// Which half of a block a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffSide {
    /// Old revision.
    Left,
    /// New revision.
    Right,
}

/// One logical line of one side of the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line-number label shown above the rows (e.g. "Line 12:").
    pub line_hint: String,
    /// Rendered rows; empty when this side has no content.
    pub rows: Vec<DiffRow>,
}

impl DiffLine {
    /// Create a line with a hint and no rows.
    pub fn new(line_hint: impl Into<String>) -> Self {
        Self {
            line_hint: line_hint.into(),
            rows: Vec::new(),
        }
    }

    /// True if this side carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One visually rendered row within a [`DiffLine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    /// Whether the row was added, removed or left alone.
    pub marker: DiffRowMarker,
    /// Ordered text runs making up the row.
    pub content: Vec<DiffContentSpan>,
}

impl DiffRow {
    /// Create an empty row with the given marker.
    pub fn new(marker: DiffRowMarker) -> Self {
        Self {
            marker,
            content: Vec::new(),
        }
    }

    /// Create an unmarked row holding a single plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut row = Self::new(DiffRowMarker::None);
        row.push_span(text, DiffRowContentType::Plain);
        row
    }

    /// Append text, merging it into the last span when the type matches.
    /// Empty text is ignored.
    pub fn push_span(&mut self, text: impl Into<String>, kind: DiffRowContentType) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.content.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(&text),
            _ => self.content.push(DiffContentSpan { text, kind }),
        }
    }

    /// Visible text of the row with styling removed.
    pub fn text(&self) -> String {
        self.content.iter().map(|span| span.text.as_str()).collect()
    }

    /// True if any span is highlighted as added or deleted.
    pub fn has_inline_changes(&self) -> bool {
        self.content
            .iter()
            .any(|span| span.kind != DiffRowContentType::Plain)
    }
}

/// Row-level change indicator, drives the border and icon beside a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffRowMarker {
    /// Unchanged (context) or unclassified row.
    #[default]
    None,
    /// Added row.
    Plus,
    /// Removed row.
    Minus,
}

impl DiffRowMarker {
    /// Get the single-character symbol for this marker.
    pub fn symbol(&self) -> char {
        match self {
            DiffRowMarker::None => ' ',
            DiffRowMarker::Plus => '+',
            DiffRowMarker::Minus => '-',
        }
    }
}

/// A contiguous run of text sharing one highlight type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffContentSpan {
    /// The text content.
    pub text: String,
    /// Inline highlight type.
    #[serde(rename = "type")]
    pub kind: DiffRowContentType,
}

impl DiffContentSpan {
    /// Create a span.
    pub fn new(text: impl Into<String>, kind: DiffRowContentType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Inline highlight type of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffRowContentType {
    /// Unchanged text.
    #[default]
    Plain,
    /// Inserted text.
    Add,
    /// Removed text.
    Delete,
}

impl DiffRowContentType {
    /// Inline change type implied by a row marker, for markup that only says
    /// "this part changed" without saying how.
    pub fn from_marker(marker: DiffRowMarker) -> Self {
        match marker {
            DiffRowMarker::None => DiffRowContentType::Plain,
            DiffRowMarker::Plus => DiffRowContentType::Add,
            DiffRowMarker::Minus => DiffRowContentType::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_span_merges_same_kind() {
        let mut row = DiffRow::new(DiffRowMarker::Minus);
        row.push_span("a ", DiffRowContentType::Plain);
        row.push_span("b", DiffRowContentType::Plain);
        row.push_span("", DiffRowContentType::Delete);
        row.push_span("c", DiffRowContentType::Delete);

        assert_eq!(
            row.content,
            vec![
                DiffContentSpan::new("a b", DiffRowContentType::Plain),
                DiffContentSpan::new("c", DiffRowContentType::Delete),
            ]
        );
        assert_eq!(row.text(), "a bc");
        assert!(row.has_inline_changes());
    }

    #[test]
    fn test_pure_addition_and_deletion() {
        let mut block = DiffBlock::new(DiffLine::new("Line 3:"), DiffLine::new("Line 3:"));
        block.right.rows.push(DiffRow {
            marker: DiffRowMarker::Plus,
            content: vec![DiffContentSpan::new("new", DiffRowContentType::Plain)],
        });
        assert!(block.is_pure_addition());
        assert!(!block.is_pure_deletion());

        std::mem::swap(&mut block.left, &mut block.right);
        block.left.rows[0].marker = DiffRowMarker::Minus;
        assert!(block.is_pure_deletion());
        assert!(!block.is_pure_addition());
    }

    #[test]
    fn test_marker_symbols_and_implied_kind() {
        assert_eq!(DiffRowMarker::Plus.symbol(), '+');
        assert_eq!(DiffRowMarker::Minus.symbol(), '-');
        assert_eq!(DiffRowMarker::None.symbol(), ' ');
        assert_eq!(
            DiffRowContentType::from_marker(DiffRowMarker::Minus),
            DiffRowContentType::Delete
        );
    }

    #[test]
    fn test_serialized_names() {
        let span = DiffContentSpan::new("x", DiffRowContentType::Add);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"{"text":"x","type":"ADD"}"#);

        let marker = serde_json::to_string(&DiffRowMarker::Minus).unwrap();
        assert_eq!(marker, r#""MINUS""#);
    }
}
