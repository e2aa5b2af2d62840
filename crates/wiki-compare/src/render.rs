//! Text rendering of diff blocks and tinted wikitext.
//!
//! With colour on, rows get a left bar in the palette's border colour and
//! changed spans get true-colour backgrounds. Without colour, changes are
//! bracketed as `[-removed-]` and `{+added+}`.

use wiki_diff::{
    split_sides, Compare, DiffExtraction, DiffLine, DiffPalette, DiffRow, DiffRowContentType,
    ExtractionOutcome, Rgba,
};
use wikitext_tint::{TintStyle, TintedRun};

const RESET: &str = "\x1b[0m";
const BAR: char = '▌';

/// Options for [`render_diff`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub palette: DiffPalette,
    pub color: bool,
    pub show_line_hints: bool,
    pub no_diff_message: String,
}

/// Render an extraction as two sections, old revision then new revision.
pub fn render_diff(compare: &Compare, extraction: &DiffExtraction, opts: &RenderOptions) -> String {
    let mut out = String::new();

    if let Some(header) = revision_header(compare) {
        out.push_str(&header);
        out.push_str("\n\n");
    }

    if extraction.blocks.is_empty() {
        // An unrecognised body is reported by the caller, not as "no changes".
        if extraction.outcome != ExtractionOutcome::Unrecognized {
            out.push_str(&opts.no_diff_message);
            out.push('\n');
        }
        return out;
    }

    let (left, right) = split_sides(extraction.blocks.clone());
    render_side(&mut out, &old_title(compare), &left, opts);
    out.push('\n');
    render_side(&mut out, &new_title(compare), &right, opts);
    out
}

fn revision_header(compare: &Compare) -> Option<String> {
    let user = compare.touser.as_deref()?;
    let mut header = match compare.torevid {
        Some(rev) => format!("Revision {} by {}", rev, user),
        None => format!("Edit by {}", user),
    };
    if let Some(comment) = compare.tocomment.as_deref().filter(|c| !c.is_empty()) {
        header.push_str(&format!(": {}", comment));
    }
    Some(header)
}

fn old_title(compare: &Compare) -> String {
    match compare.fromrevid {
        Some(rev) => format!("--- old (r{})", rev),
        None => "--- old".to_string(),
    }
}

fn new_title(compare: &Compare) -> String {
    match compare.torevid {
        Some(rev) => format!("+++ new (r{})", rev),
        None => "+++ new".to_string(),
    }
}

fn render_side(out: &mut String, title: &str, lines: &[DiffLine], opts: &RenderOptions) {
    out.push_str(title);
    out.push('\n');
    for line in lines {
        if opts.show_line_hints && !line.line_hint.is_empty() {
            out.push_str(&line.line_hint);
            out.push('\n');
        }
        for row in &line.rows {
            render_row(out, row, opts);
        }
    }
}

fn render_row(out: &mut String, row: &DiffRow, opts: &RenderOptions) {
    if opts.color {
        let border = opts.palette.border(row.marker);
        out.push_str(&format!("{}{}{} {} ", fg(border), BAR, RESET, row.marker.symbol()));
        for span in &row.content {
            let background = opts.palette.background(span.kind);
            if background.is_transparent() {
                out.push_str(&span.text);
            } else {
                let solid = background.over(opts.palette.page);
                out.push_str(&format!("{}{}{}", bg(solid), span.text, RESET));
            }
        }
    } else {
        out.push_str(&format!("{} ", row.marker.symbol()));
        for span in &row.content {
            match span.kind {
                DiffRowContentType::Plain => out.push_str(&span.text),
                DiffRowContentType::Add => out.push_str(&format!("{{+{}+}}", span.text)),
                DiffRowContentType::Delete => out.push_str(&format!("[-{}-]", span.text)),
            }
        }
    }
    out.push('\n');
}

/// Render tinted wikitext with ANSI styling.
pub fn render_tinted(runs: &[TintedRun]) -> String {
    let mut out = String::new();
    for run in runs {
        if run.style.is_plain() {
            out.push_str(&run.text);
        } else {
            out.push_str(&format!("{}{}{}", sgr(&run.style), run.text, RESET));
        }
    }
    out
}

fn sgr(style: &TintStyle) -> String {
    let mut codes = Vec::new();
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if let Some(color) = style.color {
        codes.push(format!("38;2;{};{};{}", color.r, color.g, color.b));
    }
    format!("\x1b[{}m", codes.join(";"))
}

fn fg(color: Rgba) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn bg(color: Rgba) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiki_diff::{ColorScheme, DiffBlockExtractor};

    const BODY: &str = r#"<tr><td colspan="2" class="diff-lineno">Line 2:</td><td colspan="2" class="diff-lineno">Line 2:</td></tr><tr><td class="diff-marker"></td><td class="diff-deletedline diff-side-deleted"><div>a <del class="diffchange">b</del></div></td><td class="diff-marker"></td><td class="diff-addedline diff-side-added"><div>a <ins class="diffchange">c</ins></div></td></tr>"#;

    fn options(color: bool) -> RenderOptions {
        RenderOptions {
            palette: DiffPalette::for_scheme(ColorScheme::Light),
            color,
            show_line_hints: true,
            no_diff_message: "No differences".to_string(),
        }
    }

    #[test]
    fn test_render_without_color() {
        let compare = Compare {
            fromrevid: Some(1),
            torevid: Some(2),
            touser: Some("Editor".to_string()),
            tocomment: Some("tweak".to_string()),
            ..Compare::from_body(BODY)
        };
        let extraction = compare.extract(&DiffBlockExtractor::new());

        assert_eq!(
            render_diff(&compare, &extraction, &options(false)),
            "Revision 2 by Editor: tweak\n\n\
             --- old (r1)\nLine 2:\n- a [-b-]\n\n\
             +++ new (r2)\nLine 2:\n+ a {+c+}\n"
        );
    }

    #[test]
    fn test_render_with_color_uses_palette() {
        let compare = Compare::from_body(BODY);
        let extraction = compare.extract(&DiffBlockExtractor::new());
        let text = render_diff(&compare, &extraction, &options(true));

        // Plus border and add background are both #d8ecff in the light palette
        assert!(text.contains("\x1b[38;2;216;236;255m▌"));
        assert!(text.contains("\x1b[48;2;216;236;255mc\x1b[0m"));
        assert!(text.contains("\x1b[48;2;255;228;156mb\x1b[0m"));
    }

    #[test]
    fn test_render_no_changes() {
        let compare = Compare::from_body("");
        let extraction = compare.extract(&DiffBlockExtractor::new());
        assert_eq!(
            render_diff(&compare, &extraction, &options(false)),
            "No differences\n"
        );
    }

    #[test]
    fn test_render_recognized_body_without_rows() {
        let compare = Compare::from_body(
            r#"<tr><td class="diff-marker"></td><td class="diff-empty"></td></tr>"#,
        );
        let extraction = compare.extract(&DiffBlockExtractor::new());
        assert_eq!(extraction.outcome, ExtractionOutcome::Changes);
        assert!(extraction.blocks.is_empty());

        assert_eq!(
            render_diff(&compare, &extraction, &options(false)),
            "No differences\n"
        );
    }

    #[test]
    fn test_render_unrecognized_prints_no_message() {
        let compare = Compare::from_body("<p>not a diff</p>");
        let extraction = compare.extract(&DiffBlockExtractor::new());
        assert_eq!(extraction.outcome, ExtractionOutcome::Unrecognized);
        assert_eq!(render_diff(&compare, &extraction, &options(false)), "");
    }

    #[test]
    fn test_render_tinted() {
        let runs = wikitext_tint::tint_wikitext("x '''y'''");
        assert_eq!(render_tinted(&runs), "x \x1b[1m'''y'''\x1b[0m");
    }
}
