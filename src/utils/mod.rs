//! Shared building blocks for the formatting pipelines

pub mod rewrite;
pub mod tag_balance;

pub use rewrite::{RewriteStats, Span, rewrite_spans};
pub use tag_balance::{TagBalance, is_tag_intersection};
