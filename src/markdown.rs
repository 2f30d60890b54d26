//! Inline markdown for chat messages
//!
//! Supported spans, applied in this order over the same progressively
//! rewritten message:
//!
//! | Markup         | Output                                          |
//! |----------------|-------------------------------------------------|
//! | `/text/`       | `<i>text</i>`                                   |
//! | `*text*`       | `<b>text</b>`                                   |
//! | `_text_`       | `<u>text</u>`                                   |
//! | `~text~`       | `<s>text</s>`                                   |
//! | `` `text` ``   | `<font color=#595959><code>text</code></font>`  |
//! | `**text**`     | `<b>text</b>`                                   |
//! | `//text//`     | `<i>text</i>`                                   |
//! | `__text__`     | `<u>text</u>`                                   |
//! | `~~text~~`     | `<s>text</s>`                                   |
//! | ```` ```text``` ```` | `<font color=#595959><code>text</code></font>` |
//!
//! Spans do not nest. A span whose payload holds an unbalanced tag structure,
//! typically a tag inserted by an earlier pattern, is left as it is.

use crate::patterns::{MARKDOWN_PATTERNS, MarkdownPattern};
use crate::utils::rewrite::{Span, rewrite_spans};
use crate::utils::tag_balance::is_tag_intersection;

/// Apply markdown to a message.
///
/// With `show_formatting_symbols` the delimiters stay inside the produced tags
/// (`*bold*` becomes `<b>*bold*</b>`); otherwise they are removed.
pub fn apply_markdown(message: &str, show_formatting_symbols: bool) -> String {
    let mut result = message.to_string();

    for pattern in MARKDOWN_PATTERNS.iter() {
        if !pattern.may_match(&result) {
            continue;
        }

        let spans = find_spans(pattern, &result);
        if spans.is_empty() {
            continue;
        }

        let (rewritten, stats) = rewrite_spans(&result, spans, |span| {
            let payload = if show_formatting_symbols { span.full } else { span.inner };
            if is_tag_intersection(payload) {
                log::trace!("Skipping {:?} span at {}: tag intersection", pattern.style, span.start);
                return None;
            }
            Some(pattern.style.wrap(payload))
        });

        log::debug!(
            "{:?} pass: {} replaced, {} skipped, {:+} bytes",
            pattern.delimiter,
            stats.replaced,
            stats.skipped,
            stats.delta
        );
        result = rewritten;
    }

    result
}

/// Collect every match of `pattern` in `text`, left to right.
///
/// Line-bound patterns are searched one line at a time, so a runtime error
/// from the backtracking engine only leaves the rest of that line unformatted.
fn find_spans<'t>(pattern: &MarkdownPattern, text: &'t str) -> Vec<Span<'t>> {
    if pattern.delimiter.spans_lines() {
        return find_multiline_spans(pattern, text);
    }

    let mut spans = Vec::new();
    let mut line_start = 0;

    // A line boundary is whitespace on both sides, so searching a line on its
    // own finds exactly the spans a whole-text search would.
    for line in text.split_inclusive('\n') {
        if pattern.may_match(line) {
            for caps in pattern.regex.captures_iter(line) {
                match caps {
                    Ok(caps) => {
                        if let (Some(full), Some(inner)) = (caps.get(0), caps.get(1)) {
                            spans.push(Span::with_inner(full, inner).shifted(line_start));
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "Skipped rest of line at byte {} in {:?} scan: {}",
                            line_start,
                            pattern.delimiter,
                            e
                        );
                        break;
                    }
                }
            }
        }
        line_start += line.len();
    }

    spans
}

/// Search for spans that may cross newlines. After an engine error the search
/// resumes at the start of the next line.
fn find_multiline_spans<'t>(pattern: &MarkdownPattern, text: &'t str) -> Vec<Span<'t>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        match pattern.regex.captures_from_pos(text, pos) {
            Ok(Some(caps)) => {
                let (Some(full), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    break;
                };
                spans.push(Span::with_inner(full, inner));
                pos = full.end();
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("{:?} scan failed at byte {}: {}", pattern.delimiter, pos, e);
                match text[pos..].find('\n') {
                    Some(newline) => pos += newline + 1,
                    None => break,
                }
            }
        }
    }

    spans
}
