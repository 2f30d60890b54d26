//! Tag balance heuristic used before wrapping a markdown span
//!
//! This is not an HTML parser. It counts bare tag names (`<b>`, `</code>`) in a
//! candidate payload; tags carrying attributes such as `<font color=#595959>`
//! are not counted, while their closing tag is.

use regex::Regex;
use std::sync::LazyLock;

/// Tag name directly enclosed in angle brackets, with an optional leading slash
static TAG_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(/?[a-zA-Z0-9]+)>").unwrap());

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TagBalance {
    pub opening: usize,
    pub closing: usize,
}

impl TagBalance {
    pub fn count(text: &str) -> Self {
        let mut balance = Self::default();
        if !text.contains('<') {
            return balance;
        }

        for caps in TAG_NAME_REGEX.captures_iter(text) {
            if caps[1].starts_with('/') {
                balance.closing += 1;
            } else {
                balance.opening += 1;
            }
        }
        balance
    }

    pub fn is_balanced(&self) -> bool {
        self.opening == self.closing
    }
}

/// True when wrapping `payload` would intersect an existing tag structure
pub fn is_tag_intersection(payload: &str) -> bool {
    !TagBalance::count(payload).is_balanced()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_balanced() {
        assert_eq!(TagBalance::count("no tags at all"), TagBalance::default());
        assert!(!is_tag_intersection(""));
        assert!(!is_tag_intersection("a < b > c"));
    }

    #[test]
    fn test_paired_tags_are_balanced() {
        let balance = TagBalance::count("<b>x</b> and <i>y</i>");
        assert_eq!(balance, TagBalance { opening: 2, closing: 2 });
        assert!(!is_tag_intersection("<b>x</b>"));
    }

    #[test]
    fn test_lone_tags_intersect() {
        assert!(is_tag_intersection("<b>x"));
        assert!(is_tag_intersection("x</i>"));
        assert!(is_tag_intersection("</b> <b>  <b>"));
    }

    #[test]
    fn test_tags_with_attributes_not_counted() {
        let balance = TagBalance::count(r#"<a href="x">x</a>"#);
        assert_eq!(balance, TagBalance { opening: 0, closing: 1 });
        assert!(is_tag_intersection(r#"<a href="x">x</a>"#));
    }

    #[test]
    fn test_rendered_code_span_intersects() {
        // `<font color=...>` is not counted but `</font>` is
        let rendered = "<font color=#595959><code>x</code></font>";
        assert_eq!(TagBalance::count(rendered), TagBalance { opening: 1, closing: 2 });
        assert!(is_tag_intersection(rendered));
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(TagBalance::count("<<b>>"), TagBalance { opening: 1, closing: 0 });
        assert_eq!(TagBalance::count("<b c>"), TagBalance::default());
        assert_eq!(TagBalance::count("<>"), TagBalance::default());
    }
}
