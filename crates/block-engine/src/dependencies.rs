//! Dependency resolution for a selected template

use crate::types::Template;

/// External resources the template needs, in declaration order.
///
/// Templates carry their own dependency list; nothing is looked up or
/// verified here.
pub fn resolve_dependencies(template: &Template) -> Vec<String> {
    template.dependencies.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::strings;
    use crate::types::NewTemplate;

    #[test]
    fn test_pass_through_in_order() {
        let new = NewTemplate::new("chart", "chart_v1", "<canvas></canvas>")
            .with_dependencies(strings(&["https://cdn/b.js", "https://cdn/a.js"]));
        let template = Template::from_new("t-1", new, chrono::Utc::now());

        assert_eq!(
            resolve_dependencies(&template),
            strings(&["https://cdn/b.js", "https://cdn/a.js"])
        );
    }

    #[test]
    fn test_no_dependencies() {
        let template = Template::from_new(
            "t-2",
            NewTemplate::new("modal", "modal_v1", "<div></div>"),
            chrono::Utc::now(),
        );
        assert!(resolve_dependencies(&template).is_empty());
    }
}
