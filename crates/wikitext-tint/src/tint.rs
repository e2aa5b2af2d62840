//! Main tinting logic for wikitext

use crate::markup::{line_tints, PairMarkup, PAIR_MARKUP};
use crate::types::{TintStyle, TintedRun};

/// Characters that can start a paired markup token
const OPENER_STARTS: [char; 4] = ['[', '{', '<', '\''];

/// Tint wikitext for display in an editor
///
/// Line markup (headings, list prefixes) is applied first; paired markup is
/// then scanned left to right, without nesting, and laid over it. Runs come
/// back coalesced, and joining their text reproduces the input exactly.
///
/// # Example
///
/// ```
/// use wikitext_tint::{tint_wikitext, plain_text};
///
/// let runs = tint_wikitext("See [[Main Page]].");
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[1].text, "[[Main Page]]");
/// assert_eq!(plain_text(&runs), "See [[Main Page]].");
/// ```
pub fn tint_wikitext(wikitext: &str) -> Vec<TintedRun> {
    // One style per byte; every range below starts and ends on a char boundary.
    let mut styles = vec![TintStyle::PLAIN; wikitext.len()];

    apply_line_markup(wikitext, &mut styles);
    apply_pair_markup(wikitext, &mut styles);

    let runs = coalesce(wikitext, &styles);
    log::trace!("Tinted {} bytes of wikitext into {} runs", wikitext.len(), runs.len());
    runs
}

fn apply_line_markup(wikitext: &str, styles: &mut [TintStyle]) {
    let mut offset = 0;
    for raw_line in wikitext.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(['\r', '\n']);
        for tint in line_tints(line) {
            for style in &mut styles[offset + tint.range.start..offset + tint.range.end] {
                *style = tint.style;
            }
        }
        offset += raw_line.len();
    }
}

fn apply_pair_markup(wikitext: &str, styles: &mut [TintStyle]) {
    let mut pos = 0;
    while pos < wikitext.len() {
        // Jump to the next character that could open a pair
        let Some(skip) = wikitext[pos..].find(OPENER_STARTS) else {
            break;
        };
        pos += skip;

        let rest = &wikitext[pos..];
        let Some(markup) = PAIR_MARKUP.iter().find(|m| rest.starts_with(m.open)) else {
            // Opener characters are ASCII
            pos += 1;
            continue;
        };

        match find_close(rest, markup) {
            Some(end) => {
                for style in &mut styles[pos..pos + end] {
                    *style = style.overlay(&markup.style);
                }
                pos += end;
            }
            // Unterminated: leave the opener as plain text
            None => pos += markup.open.len(),
        }
    }
}

/// Byte length of the paired markup at the start of `text`, closing token
/// included, if it is closed.
fn find_close(text: &str, markup: &PairMarkup) -> Option<usize> {
    let body = &text[markup.open.len()..];
    let limit = if markup.line_bound {
        body.find('\n').unwrap_or(body.len())
    } else {
        body.len()
    };

    body[..limit]
        .find(markup.close)
        .map(|at| markup.open.len() + at + markup.close.len())
}

fn coalesce(wikitext: &str, styles: &[TintStyle]) -> Vec<TintedRun> {
    let mut runs: Vec<TintedRun> = Vec::new();
    let mut run_start = 0;

    for (idx, _) in wikitext.char_indices().skip(1) {
        if styles[idx] != styles[run_start] {
            runs.push(TintedRun::new(&wikitext[run_start..idx], styles[run_start]));
            run_start = idx;
        }
    }
    if run_start < wikitext.len() {
        runs.push(TintedRun::new(&wikitext[run_start..], styles[run_start]));
    }

    runs
}
