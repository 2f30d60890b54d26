//! Pattern tables for URL highlighting and inline markdown
//!
//! Both tables are ordered: the URL table is scanned pattern by pattern against
//! the progressively rewritten message, and every markdown pattern sees the
//! tags inserted by the ones before it.
//!
//! URL patterns need no lookaround and run on the linear-time `regex` engine.
//! Markdown patterns rely on lookbehind/lookahead around the delimiters, so they
//! are compiled with `fancy_regex`.

use fancy_regex::{Regex as FancyRegex, RegexBuilder as FancyRegexBuilder};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Text color used for inline code and fenced blocks
pub const CODE_COLOR: &str = "#595959";

/// Characters allowed in the path part of a web URL (RFC 3986, section 2).
/// Word characters are ASCII only.
const URL_PATH_CLASS: &str = r"(?-u:[\w:/?#\[\]@!$&'{}*+,;.~%=-])";

/// Anything but ASCII whitespace. NBSP and other Unicode spaces belong to the link.
const URL_NON_SPACE: &str = r"[^\t\n\x0B\x0C\r ]";

/// Backtracking budget of a single markdown search
pub const MARKDOWN_BACKTRACK_LIMIT: usize = 1_000_000;

/// Which kind of link a URL pattern recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// `www.`, `http://`, `https://` and `ftp://` links
    Web,
    /// `file://` and `smb://` links
    FileShare,
    /// `tox:` followed by a 76 character Tox ID
    ToxId,
    /// `mailto:` addresses
    Mailto,
    /// `tox:` followed by a `name@domain` address
    ToxName,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlKind::Web => write!(f, "web"),
            UrlKind::FileShare => write!(f, "file-share"),
            UrlKind::ToxId => write!(f, "tox-id"),
            UrlKind::Mailto => write!(f, "mailto"),
            UrlKind::ToxName => write!(f, "tox-name"),
        }
    }
}

pub struct UrlPattern {
    pub kind: UrlKind,
    pub regex: Regex,
    /// Literals of which at least one must occur for the pattern to match
    pub triggers: &'static [&'static str],
}

impl UrlPattern {
    fn new(kind: UrlKind, pattern: &str, triggers: &'static [&'static str]) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).unwrap(),
            triggers,
        }
    }

    /// Cheap literal check before running the regex
    pub fn may_match(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| text.contains(t))
    }

    /// Wrap a matched URL in a hyperlink
    pub fn wrap(url: &str) -> String {
        format!(r#"<a href="{url}">{url}</a>"#)
    }
}

/// URL patterns in the order they are applied
pub static URL_PATTERNS: LazyLock<Vec<UrlPattern>> = LazyLock::new(|| {
    vec![
        UrlPattern::new(
            UrlKind::Web,
            &format!(r"(?-u:\b)(?:www\.|(?:https?|ftp)://){URL_PATH_CLASS}+"),
            &["www.", "://"],
        ),
        // Deliberately wide: runs up to the next tab or newline, spaces included
        UrlPattern::new(UrlKind::FileShare, r"(?-u:\b)(?:file|smb)://[^\t\n\x0B\x0C\r]*", &["file://", "smb://"]),
        UrlPattern::new(UrlKind::ToxId, r"(?-u:\b)tox:[a-zA-Z0-9]{76}", &["tox:"]),
        UrlPattern::new(
            UrlKind::Mailto,
            &format!(r"(?-u:\b)mailto:{URL_NON_SPACE}+@{URL_NON_SPACE}+\.{URL_NON_SPACE}+"),
            &["mailto:"],
        ),
        UrlPattern::new(
            UrlKind::ToxName,
            &format!(r"(?-u:\b)tox:{URL_NON_SPACE}+@{URL_NON_SPACE}+"),
            &["tox:"],
        ),
    ]
});

/// Presentation markup a markdown span is wrapped in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Italic,
    Bold,
    Underline,
    Strikethrough,
    Code,
}

impl InlineStyle {
    /// Apply this style's template to a payload
    pub fn wrap(self, payload: &str) -> String {
        match self {
            InlineStyle::Italic => format!("<i>{payload}</i>"),
            InlineStyle::Bold => format!("<b>{payload}</b>"),
            InlineStyle::Underline => format!("<u>{payload}</u>"),
            InlineStyle::Strikethrough => format!("<s>{payload}</s>"),
            InlineStyle::Code => format!("<font color={CODE_COLOR}><code>{payload}</code></font>"),
        }
    }
}

/// Shape of the delimiters around a markdown span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `*text*`; the payload may not contain the delimiter
    Single(char),
    /// `**text**`; the payload may contain the delimiter singly
    Double(char),
    /// Triple backtick fence spanning any number of lines
    Fence,
}

impl Delimiter {
    /// Regex source for this delimiter. Capture group 1 is the payload.
    ///
    /// The opening delimiter must follow start-of-text or whitespace and be
    /// followed by a non-whitespace character; the closing delimiter mirrors
    /// that. Payloads are matched lazily, so the nearest valid closer wins.
    pub fn pattern(self) -> String {
        match self {
            Delimiter::Single(d) => {
                format!(r"(?:^|(?<=\s))[{d}](?!\s)([^{d}\n]+?)(?<!\s)[{d}](?=$|\s)")
            }
            Delimiter::Double(d) => {
                format!(r"(?:^|(?<=\s))[{d}]{{2}}(?!\s)([^\n]+?)(?<!\s)[{d}]{{2}}(?=$|\s)")
            }
            Delimiter::Fence => r"(?s)(?:^|(?<=\s))```(?!`)(.+?)(?<!`)```(?=$|\s)".to_string(),
        }
    }

    /// Literal that must be present for the pattern to match
    pub fn trigger(self) -> String {
        match self {
            Delimiter::Single(d) => d.to_string(),
            Delimiter::Double(d) => format!("{d}{d}"),
            Delimiter::Fence => "```".to_string(),
        }
    }

    /// Whether a span may run across newlines
    pub fn spans_lines(self) -> bool {
        matches!(self, Delimiter::Fence)
    }
}

pub struct MarkdownPattern {
    pub delimiter: Delimiter,
    pub style: InlineStyle,
    pub regex: FancyRegex,
    trigger: String,
}

impl MarkdownPattern {
    fn new(delimiter: Delimiter, style: InlineStyle) -> Self {
        Self::with_backtrack_limit(delimiter, style, MARKDOWN_BACKTRACK_LIMIT).unwrap()
    }

    pub fn with_backtrack_limit(
        delimiter: Delimiter,
        style: InlineStyle,
        limit: usize,
    ) -> Result<Self, fancy_regex::Error> {
        let regex = FancyRegexBuilder::new(&delimiter.pattern())
            .backtrack_limit(limit)
            .build()?;
        Ok(Self {
            delimiter,
            style,
            regex,
            trigger: delimiter.trigger(),
        })
    }

    pub fn may_match(&self, text: &str) -> bool {
        text.contains(self.trigger.as_str())
    }
}

impl fmt::Debug for MarkdownPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownPattern")
            .field("delimiter", &self.delimiter)
            .field("style", &self.style)
            .finish()
    }
}

/// Markdown patterns in the order they are applied.
///
/// Single delimiters run before double ones, so `**a**` is never split by the
/// single `*` pattern (its inner `*a*` is not preceded by whitespace).
pub static MARKDOWN_PATTERNS: LazyLock<Vec<MarkdownPattern>> = LazyLock::new(|| {
    use Delimiter::{Double, Fence, Single};
    use InlineStyle::{Bold, Code, Italic, Strikethrough, Underline};

    vec![
        MarkdownPattern::new(Single('/'), Italic),
        MarkdownPattern::new(Single('*'), Bold),
        MarkdownPattern::new(Single('_'), Underline),
        MarkdownPattern::new(Single('~'), Strikethrough),
        MarkdownPattern::new(Single('`'), Code),
        MarkdownPattern::new(Double('*'), Bold),
        MarkdownPattern::new(Double('/'), Italic),
        MarkdownPattern::new(Double('_'), Underline),
        MarkdownPattern::new(Double('~'), Strikethrough),
        MarkdownPattern::new(Fence, Code),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(URL_PATTERNS.len(), 5);
        assert_eq!(MARKDOWN_PATTERNS.len(), 10);
    }

    #[test]
    fn test_url_pattern_order() {
        let kinds: Vec<UrlKind> = URL_PATTERNS.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UrlKind::Web,
                UrlKind::FileShare,
                UrlKind::ToxId,
                UrlKind::Mailto,
                UrlKind::ToxName
            ]
        );
    }

    #[test]
    fn test_markdown_pattern_order() {
        let order: Vec<(Delimiter, InlineStyle)> = MARKDOWN_PATTERNS.iter().map(|p| (p.delimiter, p.style)).collect();
        assert_eq!(order[0], (Delimiter::Single('/'), InlineStyle::Italic));
        assert_eq!(order[4], (Delimiter::Single('`'), InlineStyle::Code));
        assert_eq!(order[5], (Delimiter::Double('*'), InlineStyle::Bold));
        assert_eq!(order[9], (Delimiter::Fence, InlineStyle::Code));
    }

    #[test]
    fn test_inline_style_templates() {
        assert_eq!(InlineStyle::Italic.wrap("x"), "<i>x</i>");
        assert_eq!(InlineStyle::Bold.wrap("x"), "<b>x</b>");
        assert_eq!(InlineStyle::Underline.wrap("x"), "<u>x</u>");
        assert_eq!(InlineStyle::Strikethrough.wrap("x"), "<s>x</s>");
        assert_eq!(
            InlineStyle::Code.wrap("x"),
            "<font color=#595959><code>x</code></font>"
        );
    }

    #[test]
    fn test_url_wrap_repeats_url() {
        assert_eq!(UrlPattern::wrap("www.a.b"), r#"<a href="www.a.b">www.a.b</a>"#);
    }

    #[test]
    fn test_single_delimiter_boundaries() {
        let bold = &MARKDOWN_PATTERNS[1];
        assert!(bold.regex.is_match("*a*").unwrap());
        assert!(bold.regex.is_match("x *a* y").unwrap());
        assert!(!bold.regex.is_match("x*a* y").unwrap());
        assert!(!bold.regex.is_match("* a*").unwrap());
        assert!(!bold.regex.is_match("*a *").unwrap());
        assert!(!bold.regex.is_match("*a*b").unwrap());
    }

    #[test]
    fn test_fence_spans_lines() {
        let fence = &MARKDOWN_PATTERNS[9];
        let caps = fence.regex.captures("```line one\nline two```").unwrap().unwrap();
        assert_eq!(&caps[1], "line one\nline two");
        assert!(!fence.regex.is_match("````x````").unwrap());
    }

    #[test]
    fn test_only_fence_spans_lines() {
        let multiline: Vec<Delimiter> = MARKDOWN_PATTERNS
            .iter()
            .map(|p| p.delimiter)
            .filter(|d| d.spans_lines())
            .collect();
        assert_eq!(multiline, vec![Delimiter::Fence]);
    }

    #[test]
    fn test_url_non_space_is_ascii_whitespace_only() {
        let mailto = &URL_PATTERNS[3];
        assert_eq!(mailto.regex.find("mailto:a@b.c\u{a0}x").unwrap().as_str(), "mailto:a@b.c\u{a0}x");
        assert_eq!(mailto.regex.find("mailto:a@b.c\tx").unwrap().as_str(), "mailto:a@b.c");
    }

    #[test]
    fn test_trigger_prefilter() {
        let web = &URL_PATTERNS[0];
        assert!(web.may_match("see https://x"));
        assert!(web.may_match("see www.x"));
        assert!(!web.may_match("nothing here"));

        let double_tilde = &MARKDOWN_PATTERNS[8];
        assert!(!double_tilde.may_match("~one~"));
        assert!(double_tilde.may_match("~~two~~"));
    }
}
