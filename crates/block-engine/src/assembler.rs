//! Deterministic assembly of the final UI block
//!
//! The block is plain concatenation: dependency script tags, the style
//! block, the markup, then the inline script. Template text is emitted
//! verbatim and is never escaped, so templates must come from a trusted
//! store.

use serde::Serialize;

use crate::types::Template;

/// The four parts of an assembled block, before joining
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBlock {
    /// One `<script src>` tag per dependency, newline-joined
    pub dependency_links: String,
    /// `<style>` block, empty when the template has no CSS
    pub style_block: String,
    pub markup: String,
    /// Inline `<script>` block, empty when the template has no JS
    pub script_block: String,
}

impl ResolvedBlock {
    pub fn from_template(template: &Template, dependencies: &[String]) -> Self {
        let dependency_links = dependencies
            .iter()
            .map(|dep| format!("<script src=\"{}\"></script>", dep))
            .collect::<Vec<_>>()
            .join("\n");

        let style_block = if template.css.is_empty() {
            String::new()
        } else {
            format!("<style>{}</style>", template.css)
        };

        let script_block = if template.js.is_empty() {
            String::new()
        } else {
            format!("<script>{}</script>", template.js)
        };

        Self {
            dependency_links,
            style_block,
            markup: template.html.clone(),
            script_block,
        }
    }

    /// Join the parts with newlines and trim the result.
    pub fn render(&self) -> String {
        format!(
            "\n{}\n{}\n{}\n{}\n",
            self.dependency_links, self.style_block, self.markup, self.script_block
        )
        .trim()
        .to_string()
    }
}

/// Assemble the UI block for a template and its resolved dependencies.
pub fn generate_ui_block(template: &Template, dependencies: &[String]) -> String {
    ResolvedBlock::from_template(template, dependencies).render()
}
