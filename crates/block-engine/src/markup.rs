//! Cleanup helpers for raw model output

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence with optional language tag at a line start, or a closing
/// fence at a line end.
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^```[A-Za-z0-9_+-]*|```[ \t]*$").expect("fence pattern is valid"));

/// First `<style ...>...</style>` block, case-insensitive, spanning lines.
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("style pattern is valid"));

/// Remove Markdown code fences around a model response and trim it.
///
/// ```
/// use block_engine::markup::strip_code_fences;
/// assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// ```
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw.trim(), "").trim().to_string()
}

/// Markup split into its structure and the style extracted from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMarkup {
    pub html: String,
    pub css: String,
}

/// Pull the first `<style>` block out of generated markup.
///
/// The block's inner text (trimmed) becomes `css` and the block is removed
/// from the markup. Without a style block `css` is empty and the markup is
/// returned unchanged.
pub fn split_style_block(markup: &str) -> SplitMarkup {
    match STYLE_RE.captures(markup) {
        Some(caps) => {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let css = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let html = markup.replacen(whole, "", 1).trim().to_string();
            SplitMarkup { html, css }
        }
        None => SplitMarkup {
            html: markup.to_string(),
            css: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"component\": \"modal\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"component\": \"modal\"}");
    }

    #[test]
    fn test_strip_html_fence() {
        let raw = "  ```html\n<div>hi</div>\n```  ";
        assert_eq!(strip_code_fences(raw), "<div>hi</div>");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fences("```\n<p></p>\n```"), "<p></p>");
    }

    #[test]
    fn test_unfenced_text_untouched() {
        assert_eq!(strip_code_fences("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_split_style_block() {
        let markup = "<style>\n  .form { gap: 8px; }\n</style>\n<form class=\"form\"></form>";
        let split = split_style_block(markup);
        assert_eq!(split.css, ".form { gap: 8px; }");
        assert_eq!(split.html, "<form class=\"form\"></form>");
    }

    #[test]
    fn test_split_only_first_style_block() {
        let markup = "<STYLE type=\"text/css\">a{}</STYLE><div></div><style>b{}</style>";
        let split = split_style_block(markup);
        assert_eq!(split.css, "a{}");
        assert_eq!(split.html, "<div></div><style>b{}</style>");
    }

    #[test]
    fn test_split_without_style() {
        let split = split_style_block("<div></div>");
        assert_eq!(split.html, "<div></div>");
        assert!(split.css.is_empty());
    }
}
