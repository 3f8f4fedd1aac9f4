//! Prompt text sent to the language model
//!
//! The model is treated as an opaque completion service; these builders only
//! embed the request data into fixed instructions.

use serde_json::Value;

use crate::types::Intent;

/// Compact JSON array of strings
fn json_list(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}

/// Compact JSON form of an intent, absent keys omitted
fn intent_json(intent: &Intent) -> String {
    serde_json::to_string(intent).unwrap_or_else(|_| "{}".to_string())
}

/// Ask for the structured intent behind a free-text command.
pub fn intent_prompt(command: &str) -> String {
    format!(
        r#"You are an expert intent extractor for UI requests.
Extract the user command into a JSON object shaped exactly like this:
{{ "component": "...", "fields": [...], "validation": [...] }}

- "component" is a snake_case component type such as "contact_form" or "modal".
- "fields" lists the requested fields in the order the user gave them.
- "validation" lists validation rules as short strings.
Reply with the JSON object only.

Command: "{command}"
"#
    )
}

/// Ask for a brand-new component with an embedded style block.
pub fn generation_prompt(component: &str, intent: &Intent) -> String {
    format!(
        r#"You are an expert web UI developer and designer.

Generate a modern, responsive and accessible HTML snippet for a "{component}" web component.
- Use semantic HTML5 elements and ARIA attributes where appropriate.
- Include the following fields: {fields}.
- Apply the following validation: {validation}.
- Put all CSS in a single <style> block; do not use inline styles.
- Use clear labels and helpful placeholders.
- Output ONLY the HTML (with its <style> block). No explanations, no markdown, no comments.
"#,
        fields = json_list(intent.fields()),
        validation = json_list(intent.validation()),
    )
}

/// Ask the model to pick the best-fitting template by name.
pub fn selection_prompt<'a>(candidates: impl IntoIterator<Item = &'a str>, intent: &Intent) -> String {
    let names: Vec<&str> = candidates.into_iter().collect();
    format!(
        r#"Available templates:
{names}

Intent:
{intent}

Which template fits best? Reply ONLY with the template name.
"#,
        names = names.join("\n"),
        intent = intent_json(intent),
    )
}

/// Ask for an existing template rewritten to a new signature.
pub fn update_prompt(intent: &Intent, current_html: &str) -> String {
    format!(
        r#"You are an expert HTML/CSS UI generator.

Update the following HTML template to match these fields: {fields}
and validation: {validation}.
Only output valid HTML, no explanations, no markdown.

Current template:
{current_html}
"#,
        fields = json_list(intent.fields()),
        validation = json_list(intent.validation()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_prompt_embeds_command() {
        let prompt = intent_prompt("create a login form");
        assert!(prompt.contains("Command: \"create a login form\""));
        assert!(prompt.contains(r#"{ "component": "...", "fields": [...], "validation": [...] }"#));
    }

    #[test]
    fn test_selection_prompt_lists_candidates() {
        let intent = Intent::new("login_form", ["email"], Vec::<String>::new());
        let prompt = selection_prompt(["login_v1", "login_v2"], &intent);
        assert!(prompt.contains("login_v1\nlogin_v2"));
        assert!(prompt.contains(r#"{"component":"login_form","fields":["email"],"validation":[]}"#));
    }

    #[test]
    fn test_selection_prompt_omits_absent_keys() {
        let partial = Intent {
            component: Some("modal".to_string()),
            fields: Some(vec!["title".to_string()]),
            validation: None,
        };
        let prompt = selection_prompt(["modal_v1"], &partial);
        assert!(prompt.contains(r#"{"component":"modal","fields":["title"]}"#));

        let prompt = selection_prompt(["modal_v1"], &Intent::empty());
        assert!(prompt.contains("Intent:\n{}\n"));
    }

    #[test]
    fn test_generation_prompt_lists_signature() {
        let intent = Intent::new("contact_form", ["name", "email"], ["required"]);
        let prompt = generation_prompt("contact_form", &intent);
        assert!(prompt.contains(r#""contact_form" web component"#));
        assert!(prompt.contains(r#"["name","email"]"#));
        assert!(prompt.contains(r#"["required"]"#));
    }

    #[test]
    fn test_update_prompt_includes_current_markup() {
        let intent = Intent::new("login_form", ["email", "password"], Vec::<String>::new());
        let prompt = update_prompt(&intent, "<form id=\"old\"></form>");
        assert!(prompt.ends_with("<form id=\"old\"></form>\n"));
        assert!(prompt.contains(r#"["email","password"]"#));
    }
}
