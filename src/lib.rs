//! Inline markdown and URL highlighting for chat messages.
//!
//! Two independent pipelines turn a plain message into presentation markup:
//!
//! - [`highlight_url`] wraps bare links in `<a href="...">` anchors;
//! - [`apply_markdown`] turns `*bold*`, `/italic/`, `_underline_`,
//!   `~strike~`, `` `code` `` and their doubled forms into tags.
//!
//! [`render_message`] composes both with HTML escaping and quote detection.
//!
//! ```
//! use chatmark_lib::{apply_markdown, highlight_url};
//!
//! assert_eq!(apply_markdown("/a/ and *b*", false), "<i>a</i> and <b>b</b>");
//! assert_eq!(
//!     highlight_url("check www.example.com now"),
//!     r#"check <a href="www.example.com">www.example.com</a> now"#
//! );
//! ```

pub mod config;
pub mod exit_codes;
pub mod markdown;
pub mod patterns;
pub mod render;
pub mod urls;
pub mod utils;

pub use crate::config::{Config, ConfigError, StylePreference};
pub use crate::markdown::apply_markdown;
pub use crate::render::{MessageKind, RenderOptions, detect_quotes, escape_html, render_message};
pub use crate::urls::highlight_url;
