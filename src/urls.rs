//! URL highlighting
//!
//! Wraps bare links in `<a href="...">...</a>`. Every pattern in
//! [`URL_PATTERNS`] is scanned once against the output of the previous one.

use crate::patterns::{URL_PATTERNS, UrlPattern};
use crate::utils::rewrite::{Span, rewrite_spans};

/// Highlight URLs within a message.
///
/// Any input is valid; a message without links is returned unchanged.
pub fn highlight_url(message: &str) -> String {
    let mut result = message.to_string();

    for pattern in URL_PATTERNS.iter() {
        if !pattern.may_match(&result) {
            continue;
        }

        let spans = pattern.regex.find_iter(&result).map(Span::from_match);
        let (rewritten, stats) = rewrite_spans(&result, spans, |span| Some(UrlPattern::wrap(span.full)));

        if stats.replaced > 0 {
            log::debug!(
                "Highlighted {} {} link(s), {:+} bytes",
                stats.replaced,
                pattern.kind,
                stats.delta
            );
        }
        result = rewritten;
    }

    result
}
