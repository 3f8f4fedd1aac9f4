//! Subcommand implementations

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use block_engine::{
    seed_store, BlockPipeline, MemoryTemplateStore, PipelineResult, Template, TemplateStore,
    TemplateVariant,
};
use inference::{BackendInfo, BackendRegistry, InferenceGateway, SharedGateway};

use crate::config::AppConfig;
use crate::error::CliError;
use crate::event_adapter::JsonLinesEventSink;

/// Open the persistent template store and load what is on disk.
pub fn open_store(config: &AppConfig, data_dir: &Path) -> Result<Arc<MemoryTemplateStore>, CliError> {
    let dir = config.templates_dir(data_dir);
    let store = MemoryTemplateStore::with_persistence(&dir);
    store.load_from_disk()?;
    Ok(Arc::new(store))
}

/// Run one command through the pipeline, streaming events to stderr.
pub async fn run(
    config: &AppConfig,
    data_dir: &Path,
    command: &str,
    block_only: bool,
) -> Result<(), CliError> {
    let gateway: SharedGateway = match InferenceGateway::from_config(&config.inference) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            log::error!(
                "Backend '{}' unavailable; known backends: {}",
                config.inference.backend,
                BackendRegistry::new().available_names().join(", ")
            );
            return Err(e.into());
        }
    };
    let store = open_store(config, data_dir)?;
    let pipeline = BlockPipeline::new(gateway, store);

    let sink = JsonLinesEventSink::stderr();
    let result = pipeline.run(command, &sink).await?;
    println!("{}", render_result(&result, block_only)?);
    Ok(())
}

/// Replace the store contents with the starter templates.
pub async fn seed(config: &AppConfig, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(config, data_dir)?;
    for template in seed_store(store.as_ref()).await? {
        println!("{}", template_row(&template));
    }
    Ok(())
}

/// Print every stored template, one per line.
pub async fn list(config: &AppConfig, data_dir: &Path) -> Result<(), CliError> {
    let store = open_store(config, data_dir)?;
    let templates = store.list().await?;
    if templates.is_empty() {
        log::info!("No templates stored in {:?}", config.templates_dir(data_dir));
    }
    for template in &templates {
        println!("{}", template_row(template));
        for variant in store.variants_of(&template.id).await? {
            println!("{}", variant_row(&variant));
        }
    }
    Ok(())
}

/// Store a user-edited block against the template it came from.
pub async fn save(
    config: &AppConfig,
    data_dir: &Path,
    parent: &str,
    user: &str,
    file: Option<&Path>,
) -> Result<(), CliError> {
    let html = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let variant = save_variant(config, data_dir, parent, user, &html).await?;
    println!("{}", variant.id);
    Ok(())
}

async fn save_variant(
    config: &AppConfig,
    data_dir: &Path,
    parent: &str,
    user: &str,
    html: &str,
) -> Result<TemplateVariant, CliError> {
    let html = html.trim();
    if html.is_empty() {
        return Err(CliError::EmptyBlock);
    }

    let store = open_store(config, data_dir)?;
    let variant = store.save_variant(parent, user, html).await?;
    log::info!("Saved variant {} of template {} for {}", variant.id, parent, user);
    Ok(variant)
}

/// Print the registered backends, marking the configured one.
pub fn backends(config: &AppConfig) -> Result<(), CliError> {
    for info in BackendRegistry::new().list() {
        println!("{}", backend_row(&info, info.name == config.inference.backend));
    }
    Ok(())
}

fn render_result(result: &PipelineResult, block_only: bool) -> Result<String, CliError> {
    if block_only {
        Ok(result.generated_block.clone())
    } else {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

/// Tab-separated summary: id, component, name, version, signature
fn template_row(template: &Template) -> String {
    format!(
        "{}\t{}\t{}\tv{}\t[{}]",
        template.id,
        template.component,
        template.template_name,
        template.version,
        template.fields.join(", ")
    )
}

/// Indented summary of a variant under its parent row
fn variant_row(variant: &TemplateVariant) -> String {
    format!(
        "  variant\t{}\t{}\t{}",
        variant.id,
        variant.user,
        variant.created_at.to_rfc3339()
    )
}

fn backend_row(info: &BackendInfo, active: bool) -> String {
    format!(
        "{} {}\t{}\t{}",
        if active { "*" } else { " " },
        info.name,
        if info.requires_api_key { "api key" } else { "no key" },
        info.description
    )
}
