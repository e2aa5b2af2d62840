//! Parse the HTML diff table returned by a MediaWiki `action=compare` request.
//!
//! The table alternates line-header rows (`td.diff-lineno`) with content rows
//! whose cells are classed `diff-addedline`, `diff-deletedline`,
//! `diff-context`, `diff-empty` or `diff-marker`. Every header starts a new
//! [`DiffBlock`]; content cells are appended to the left or right side of the
//! current block.

use std::borrow::Cow;

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::dom::{
    child_elements, class_list, colspan, is_blank, is_formatting_whitespace, tag_name,
    text_content,
};
use crate::model::{
    DiffBlock, DiffExtraction, DiffLine, DiffRow, DiffRowContentType, DiffRowMarker, DiffSide,
    ExtractionOutcome,
};

const LINE_NUMBER: &str = "diff-lineno";
const ADDED_LINE: &str = "diff-addedline";
const DELETED_LINE: &str = "diff-deletedline";
const CONTEXT_LINE: &str = "diff-context";
const EMPTY_CELL: &str = "diff-empty";
const MARKER_CELL: &str = "diff-marker";
const SIDE_DELETED: &str = "diff-side-deleted";
const SIDE_ADDED: &str = "diff-side-added";
const INLINE_CHANGE: &str = "diffchange";
const INLINE_ADDED: &str = "mw-diff-inline-added";
const INLINE_DELETED: &str = "mw-diff-inline-deleted";

/// Columns 0 and 1 (marker + text) belong to the old revision.
const LEFT_COLUMNS: usize = 2;

/// Extract diff blocks from a compare table and classify the input.
///
/// Accepts either a complete `<table>` or the bare row markup found in the
/// compare response body. Never fails: unexpected cells degrade to plain,
/// unmarked rows.
pub fn extract(html: &str) -> DiffExtraction {
    if is_blank(html) {
        return DiffExtraction::no_changes();
    }

    let source = wrap_in_table(html);
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(&*source);

    let mut rows = Vec::new();
    collect_table_rows(&dom.document, &mut rows);

    let mut collector = BlockCollector::default();
    for row in &rows {
        collector.visit_row(row);
    }
    collector.finish(rows.len())
}

/// Extract diff blocks from a compare table.
///
/// # Example
/// ```
/// use wiki_diff::{extract_diff_blocks, DiffRowMarker};
///
/// let html = r#"<tr><td colspan="2" class="diff-lineno">Line 1:</td>
///   <td colspan="2" class="diff-lineno">Line 1:</td></tr>
///   <tr><td colspan="2" class="diff-empty diff-side-deleted"></td>
///   <td class="diff-marker" data-marker="+"></td>
///   <td class="diff-addedline diff-side-added"><div>hello</div></td></tr>"#;
///
/// let blocks = extract_diff_blocks(html);
/// assert_eq!(blocks.len(), 1);
/// assert!(blocks[0].left.rows.is_empty());
/// assert_eq!(blocks[0].right.rows[0].marker, DiffRowMarker::Plus);
/// ```
pub fn extract_diff_blocks(html: &str) -> Vec<DiffBlock> {
    extract(html).into_blocks()
}

/// Compare bodies come without the surrounding `<table>`, and table rows
/// outside a table are dropped by the HTML parser.
fn wrap_in_table(html: &str) -> Cow<'_, str> {
    let starts_with_table = html
        .trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<table"));

    if starts_with_table {
        Cow::Borrowed(html)
    } else {
        Cow::Owned(format!("<table>{}</table>", html))
    }
}

/// Collect `<tr>` elements in document order without entering cells, so rows
/// of tables nested inside a line are not mistaken for diff rows.
fn collect_table_rows(node: &Handle, rows: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        match tag_name(child) {
            Some("tr") => rows.push(child.clone()),
            Some("td") | Some("th") => {}
            Some(_) => collect_table_rows(child, rows),
            None => {}
        }
    }
}

/// Accumulates blocks during the single pass over the table rows.
#[derive(Default)]
struct BlockCollector {
    blocks: Vec<DiffBlock>,
    current: Option<DiffBlock>,
    recognized: bool,
    degraded_cells: usize,
}

impl BlockCollector {
    fn visit_row(&mut self, row: &Handle) {
        let cells = child_elements(row, &["td", "th"]);

        let hints: Vec<String> = cells
            .iter()
            .filter(|cell| has_class(cell, LINE_NUMBER))
            .map(|cell| text_content(cell).trim().to_string())
            .collect();
        if !hints.is_empty() {
            self.start_group(hints);
            return;
        }

        let mut column = 0;
        for cell in &cells {
            let classes = class_list(cell);
            let side = cell_side(&classes, column);
            column += colspan(cell);
            self.visit_cell(cell, &classes, side);
        }
    }

    fn start_group(&mut self, mut hints: Vec<String>) {
        self.recognized = true;
        self.flush();

        let left = hints.remove(0);
        let right = hints.into_iter().next().unwrap_or_else(|| left.clone());
        self.current = Some(DiffBlock::new(DiffLine::new(left), DiffLine::new(right)));
    }

    fn visit_cell(&mut self, cell: &Handle, classes: &[String], side: DiffSide) {
        let has = |class: &str| classes.iter().any(|c| c == class);

        let marker = if has(ADDED_LINE) {
            DiffRowMarker::Plus
        } else if has(DELETED_LINE) {
            DiffRowMarker::Minus
        } else if has(CONTEXT_LINE) {
            DiffRowMarker::None
        } else if has(MARKER_CELL) || has(EMPTY_CELL) {
            self.recognized = true;
            return;
        } else {
            if !is_blank(&text_content(cell)) {
                self.degraded_cells += 1;
                log::debug!("Unclassified diff cell {:?}, keeping it as plain text", classes);
                let row = build_row(cell, DiffRowMarker::None, true);
                self.push_row(side, row);
            }
            return;
        };

        self.recognized = true;
        let row = build_row(cell, marker, false);
        self.push_row(side, row);
    }

    fn push_row(&mut self, side: DiffSide, row: DiffRow) {
        // Content before the first header lands in an unlabelled group.
        let block = self
            .current
            .get_or_insert_with(|| DiffBlock::new(DiffLine::default(), DiffLine::default()));
        block.side_mut(side).rows.push(row);
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
    }

    fn finish(mut self, row_count: usize) -> DiffExtraction {
        self.flush();

        let outcome = if self.recognized {
            ExtractionOutcome::Changes
        } else {
            ExtractionOutcome::Unrecognized
        };

        if self.degraded_cells > 0 {
            log::warn!(
                "{} diff cells had no recognised class and were kept as plain text",
                self.degraded_cells
            );
        }
        log::debug!(
            "Extracted {} diff blocks from {} table rows ({:?})",
            self.blocks.len(),
            row_count,
            outcome
        );

        DiffExtraction {
            blocks: self.blocks,
            outcome,
        }
    }
}

fn has_class(node: &Handle, class: &str) -> bool {
    class_list(node).iter().any(|c| c == class)
}

/// Side a cell belongs to: explicit side class first, then its column.
fn cell_side(classes: &[String], column: usize) -> DiffSide {
    if classes.iter().any(|c| c == SIDE_DELETED) {
        DiffSide::Left
    } else if classes.iter().any(|c| c == SIDE_ADDED) {
        DiffSide::Right
    } else if column < LEFT_COLUMNS {
        DiffSide::Left
    } else {
        DiffSide::Right
    }
}

/// Build a row from a content cell. With `flatten` every span is plain.
fn build_row(cell: &Handle, marker: DiffRowMarker, flatten: bool) -> DiffRow {
    let mut row = DiffRow::new(marker);
    collect_spans(cell, DiffRowContentType::Plain, marker, flatten, &mut row);
    row
}

fn collect_spans(
    node: &Handle,
    inherited: DiffRowContentType,
    marker: DiffRowMarker,
    flatten: bool,
    row: &mut DiffRow,
) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                let text: &str = &contents;
                if !is_formatting_whitespace(text) {
                    row.push_span(text, inherited);
                }
            }
            NodeData::Element { .. } => {
                let kind = if flatten {
                    DiffRowContentType::Plain
                } else {
                    inline_kind(child, marker).unwrap_or(inherited)
                };
                collect_spans(child, kind, marker, flatten, row);
            }
            _ => {}
        }
    }
}

/// Highlight type an inline element sets for its own text, if any.
///
/// `<ins>`/`<del>` speak for themselves; a bare `diffchange` only says the
/// text changed, so the row marker decides the direction.
fn inline_kind(node: &Handle, marker: DiffRowMarker) -> Option<DiffRowContentType> {
    match tag_name(node) {
        Some("ins") => return Some(DiffRowContentType::Add),
        Some("del") => return Some(DiffRowContentType::Delete),
        _ => {}
    }

    let classes = class_list(node);
    if classes.iter().any(|c| c == INLINE_ADDED) {
        Some(DiffRowContentType::Add)
    } else if classes.iter().any(|c| c == INLINE_DELETED) {
        Some(DiffRowContentType::Delete)
    } else if classes.iter().any(|c| c == INLINE_CHANGE) {
        Some(DiffRowContentType::from_marker(marker))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiffContentSpan;
    use pretty_assertions::assert_eq;

    const CHANGED_LINE: &str = r#"<tr>
  <td colspan="2" class="diff-lineno">Line 12:</td>
  <td colspan="2" class="diff-lineno">Line 12:</td>
</tr>
<tr>
  <td class="diff-marker" data-marker="−"></td>
  <td class="diff-deletedline diff-side-deleted"><div>say <del class="diffchange diffchange-inline">foo</del> here</div></td>
  <td class="diff-marker" data-marker="+"></td>
  <td class="diff-addedline diff-side-added"><div>say <ins class="diffchange diffchange-inline">bar</ins> here</div></td>
</tr>
<tr>
  <td class="diff-marker"></td>
  <td class="diff-context diff-side-deleted"><div>unchanged</div></td>
  <td class="diff-marker"></td>
  <td class="diff-context diff-side-added"><div>unchanged</div></td>
</tr>"#;

    #[test]
    fn test_changed_line() {
        let blocks = extract_diff_blocks(CHANGED_LINE);
        assert_eq!(blocks.len(), 1);

        let block = &blocks[0];
        assert_eq!(block.left.line_hint, "Line 12:");
        assert_eq!(block.right.line_hint, "Line 12:");
        assert_eq!(block.left.rows.len(), 2);
        assert_eq!(block.right.rows.len(), 2);

        assert_eq!(block.left.rows[0].marker, DiffRowMarker::Minus);
        assert_eq!(
            block.left.rows[0].content,
            vec![
                DiffContentSpan::new("say ", DiffRowContentType::Plain),
                DiffContentSpan::new("foo", DiffRowContentType::Delete),
                DiffContentSpan::new(" here", DiffRowContentType::Plain),
            ]
        );

        assert_eq!(block.right.rows[0].marker, DiffRowMarker::Plus);
        assert_eq!(
            block.right.rows[0].content,
            vec![
                DiffContentSpan::new("say ", DiffRowContentType::Plain),
                DiffContentSpan::new("bar", DiffRowContentType::Add),
                DiffContentSpan::new(" here", DiffRowContentType::Plain),
            ]
        );

        assert_eq!(block.left.rows[1], DiffRow::plain("unchanged"));
        assert_eq!(block.right.rows[1], DiffRow::plain("unchanged"));
    }

    #[test]
    fn test_wrap_in_table() {
        assert_eq!(wrap_in_table("<tr></tr>"), "<table><tr></tr></table>");
        assert_eq!(wrap_in_table("  <TABLE><tr></tr></TABLE>"), "  <TABLE><tr></tr></TABLE>");
    }

    #[test]
    fn test_full_table_input_is_not_wrapped_twice() {
        let html = format!("<table class=\"diff\">{}</table>", CHANGED_LINE);
        assert_eq!(extract_diff_blocks(&html), extract_diff_blocks(CHANGED_LINE));
    }

    #[test]
    fn test_legacy_layout_uses_columns() {
        // Older wikis: no side classes, empty side is an unclassified nbsp cell.
        let html = r#"<tr><td colspan="2" class="diff-lineno">Line 4:</td><td colspan="2" class="diff-lineno">Line 5:</td></tr>
<tr><td colspan="2">&#160;</td><td class="diff-marker">+</td><td class="diff-addedline"><div>added</div></td></tr>
<tr><td class="diff-marker">−</td><td class="diff-deletedline"><div>gone</div></td><td colspan="2">&#160;</td></tr>"#;

        let blocks = extract_diff_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].left.line_hint, "Line 4:");
        assert_eq!(blocks[0].right.line_hint, "Line 5:");
        assert_eq!(blocks[0].left.rows.len(), 1);
        assert_eq!(blocks[0].left.rows[0].marker, DiffRowMarker::Minus);
        assert_eq!(blocks[0].left.rows[0].text(), "gone");
        assert_eq!(blocks[0].right.rows.len(), 1);
        assert_eq!(blocks[0].right.rows[0].marker, DiffRowMarker::Plus);
        assert_eq!(blocks[0].right.rows[0].text(), "added");
    }

    #[test]
    fn test_single_header_cell_labels_both_sides() {
        let html = r#"<tr><td colspan="4" class="diff-lineno">Line 7:</td></tr>"#;
        let blocks = extract_diff_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].left.line_hint, "Line 7:");
        assert_eq!(blocks[0].right.line_hint, "Line 7:");
        assert!(blocks[0].left.is_empty());
        assert!(blocks[0].right.is_empty());
    }

    #[test]
    fn test_rows_before_first_header() {
        let html = r#"<tr><td class="diff-marker"></td><td class="diff-context"><div>ctx</div></td><td class="diff-marker"></td><td class="diff-context"><div>ctx</div></td></tr>"#;
        let blocks = extract_diff_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].left.line_hint, "");
        assert_eq!(blocks[0].left.rows, vec![DiffRow::plain("ctx")]);
        assert_eq!(blocks[0].right.rows, vec![DiffRow::plain("ctx")]);
    }

    #[test]
    fn test_inline_kind_classes() {
        let html = r#"<tr><td colspan="2" class="diff-lineno">Line 1:</td><td colspan="2" class="diff-lineno">Line 1:</td></tr>
<tr><td class="diff-marker"></td><td class="diff-context diff-side-deleted"><div>a <span class="mw-diff-inline-deleted">b</span> <span class="mw-diff-inline-added">c</span> <span class="diffchange">d</span></div></td></tr>"#;

        let blocks = extract_diff_blocks(html);
        assert_eq!(
            blocks[0].left.rows[0].content,
            vec![
                DiffContentSpan::new("a ", DiffRowContentType::Plain),
                DiffContentSpan::new("b", DiffRowContentType::Delete),
                DiffContentSpan::new(" ", DiffRowContentType::Plain),
                DiffContentSpan::new("c", DiffRowContentType::Add),
                DiffContentSpan::new(" d", DiffRowContentType::Plain),
            ]
        );
        assert!(blocks[0].right.is_empty());
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = r#"<tr><td class="diff-context"><div>a &amp; b &lt;ref&gt;</div></td></tr>"#;
        let blocks = extract_diff_blocks(html);
        assert_eq!(blocks[0].left.rows[0].text(), "a & b <ref>");
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(extract("  \n ").outcome, ExtractionOutcome::NoChanges);
        assert_eq!(extract(CHANGED_LINE).outcome, ExtractionOutcome::Changes);
        assert_eq!(
            extract("<p>Service unavailable</p>").outcome,
            ExtractionOutcome::Unrecognized
        );
    }
}
