//! Starter templates for an empty store

use crate::store::{StoreError, TemplateStore};
use crate::types::{NewTemplate, Template};

const CONTACT_FORM_HTML: &str = r#"<form id="contactForm">
  <input type="text" name="name" placeholder="Your Name" required />
  <input type="email" name="email" placeholder="Your Email" required />
  <button type="submit">Submit</button>
</form>"#;

const CONTACT_FORM_CSS: &str = r#"#contactForm { display: flex; flex-direction: column; gap: 10px; width: 300px; }
#contactForm input, #contactForm button { padding: 10px; }"#;

const CONTACT_FORM_JS: &str = r#"document.getElementById('contactForm').addEventListener('submit', function(e) {
  e.preventDefault();
  alert('Form Submitted!');
});"#;

const MODAL_HTML: &str = r#"<div id="myModal" style="display:none; position:fixed; top:50%; left:50%; transform:translate(-50%,-50%); background:white; padding:20px;">
  <p>This is a modal</p>
  <button id="closeModal">Close</button>
</div>"#;

const MODAL_JS: &str = r#"document.getElementById('myModal').style.display = 'block';
document.getElementById('closeModal').addEventListener('click', function() {
  document.getElementById('myModal').style.display = 'none';
});"#;

/// The bundled starter templates: `contact_form_v1` and `modal_v1`.
pub fn seed_templates() -> Vec<NewTemplate> {
    vec![
        NewTemplate::new("contact_form", "contact_form_v1", CONTACT_FORM_HTML)
            .with_css(CONTACT_FORM_CSS)
            .with_js(CONTACT_FORM_JS),
        NewTemplate::new("modal", "modal_v1", MODAL_HTML).with_js(MODAL_JS),
    ]
}

/// Replace the store contents with the starter templates.
pub async fn seed_store(store: &dyn TemplateStore) -> Result<Vec<Template>, StoreError> {
    let removed = store.clear().await?;
    if removed > 0 {
        log::info!("Removed {} existing template(s)", removed);
    }

    let mut created = Vec::new();
    for new in seed_templates() {
        created.push(store.create(new).await?);
    }
    log::info!("Seeded {} template(s)", created.len());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTemplateStore;

    #[tokio::test]
    async fn test_seed_replaces_contents() {
        let store = MemoryTemplateStore::new();
        store
            .create(NewTemplate::new("navbar", "navbar_v1", "<nav></nav>"))
            .await
            .unwrap();

        let created = seed_store(&store).await.unwrap();

        assert_eq!(created.len(), 2);
        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.template_name)
            .collect();
        assert_eq!(names, vec!["contact_form_v1", "modal_v1"]);
    }

    #[test]
    fn test_modal_has_no_style() {
        let modal = &seed_templates()[1];
        assert_eq!(modal.component, "modal");
        assert!(modal.css.is_empty());
        assert!(modal.dependencies.is_empty());
    }
}
