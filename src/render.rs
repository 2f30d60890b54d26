//! Message rendering
//!
//! Turns a raw chat message into display markup: escape HTML, mark quoted
//! lines, highlight URLs, then apply markdown according to the style
//! preference. Links are highlighted before markdown; a markdown span that
//! contains an anchor fails the tag balance check (the `</a>` is counted, the
//! attributed `<a href=...>` is not) and is left unformatted.

use crate::config::{Config, RenderConfig, StylePreference};
use crate::markdown::apply_markdown;
use crate::urls::highlight_url;

/// Full-width greater-than sign, accepted as a quote marker
const FULLWIDTH_QUOTE_MARKER: char = '＞';

/// Kind of chat message being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Normal,
    /// `/me` style action; its first line is never treated as a quote
    Action,
}

/// Options for [`render_message`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub style: StylePreference,
    pub highlight_urls: bool,
    pub escape_html: bool,
    pub detect_quotes: bool,
    pub kind: MessageKind,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            style: config.style,
            highlight_urls: config.highlight_urls,
            escape_html: config.escape_html,
            detect_quotes: config.detect_quotes,
            kind: MessageKind::Normal,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self::from(&config.render)
    }
}

impl RenderOptions {
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Escape `&`, `<`, `>` and `"` as HTML entities
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_quote_line(line: &str) -> bool {
    line.starts_with("&gt;") || line.starts_with('>') || line.starts_with(FULLWIDTH_QUOTE_MARKER)
}

/// Wrap quoted lines in `<span class=quote>`.
///
/// A line is quoted when it starts with `>` (escaped or not) or the full-width
/// `＞`. The first line of an action message is left alone.
pub fn detect_quotes(text: &str, kind: MessageKind) -> String {
    let mut quoted = String::with_capacity(text.len());

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            quoted.push('\n');
        }

        if is_quote_line(line) && (idx > 0 || kind != MessageKind::Action) {
            quoted.push_str("<span class=quote>");
            quoted.push_str(line);
            quoted.push_str(" </span>");
        } else {
            quoted.push_str(line);
        }
    }

    quoted
}

/// Render a raw chat message into display markup
pub fn render_message(raw: &str, options: &RenderOptions) -> String {
    let mut text = if options.escape_html {
        escape_html(raw)
    } else {
        raw.to_string()
    };

    if options.detect_quotes {
        text = detect_quotes(&text, options.kind);
    }

    if options.highlight_urls {
        text = highlight_url(&text);
    }

    match options.style.show_formatting_symbols() {
        Some(show_symbols) => apply_markdown(&text, show_symbols),
        None => text,
    }
}
