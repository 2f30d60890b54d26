//! Find-all-then-rewrite over an immutable snapshot
//!
//! A pattern is scanned once against a snapshot of the message. Instead of
//! splicing replacements into the snapshot and tracking how far later match
//! positions drift, the output is rebuilt from scratch: every unmatched gap is
//! copied through, every accepted span is replaced, every rejected span is
//! copied verbatim. Positions therefore always refer to the snapshot.

/// A candidate span located in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'t> {
    /// Byte offset of the first character of the match
    pub start: usize,
    /// Byte offset one past the last character of the match
    pub end: usize,
    /// The whole matched text, delimiters included
    pub full: &'t str,
    /// Payload between the delimiters (equal to `full` for patterns without any)
    pub inner: &'t str,
}

impl<'t> Span<'t> {
    pub fn from_match(m: regex::Match<'t>) -> Self {
        Self {
            start: m.start(),
            end: m.end(),
            full: m.as_str(),
            inner: m.as_str(),
        }
    }

    pub fn with_inner(full: fancy_regex::Match<'t>, inner: fancy_regex::Match<'t>) -> Self {
        Self {
            start: full.start(),
            end: full.end(),
            full: full.as_str(),
            inner: inner.as_str(),
        }
    }

    /// Move a span found in a slice to the coordinates of the enclosing text
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self
        }
    }
}

/// Outcome counters for one rewrite pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub replaced: usize,
    pub skipped: usize,
    /// Net change in byte length of the output relative to the snapshot
    pub delta: isize,
}

/// Rebuild `snapshot`, replacing each span with whatever `replace` returns.
///
/// Spans must be ordered left to right and must not overlap, which is what a
/// regex `find_iter` produces. A span that starts before the end of the
/// previous one is ignored. When `replace` returns `None` the span is kept as
/// it was and later spans are unaffected.
pub fn rewrite_spans<'t, I, F>(snapshot: &'t str, spans: I, mut replace: F) -> (String, RewriteStats)
where
    I: IntoIterator<Item = Span<'t>>,
    F: FnMut(&Span<'t>) -> Option<String>,
{
    let mut output = String::with_capacity(snapshot.len());
    let mut stats = RewriteStats::default();
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor || span.end > snapshot.len() {
            stats.skipped += 1;
            continue;
        }

        output.push_str(&snapshot[cursor..span.start]);
        match replace(&span) {
            Some(replacement) => {
                stats.delta += replacement.len() as isize - (span.end - span.start) as isize;
                stats.replaced += 1;
                output.push_str(&replacement);
            }
            None => {
                stats.skipped += 1;
                output.push_str(span.full);
            }
        }
        cursor = span.end;
    }

    output.push_str(&snapshot[cursor..]);
    (output, stats)
}
