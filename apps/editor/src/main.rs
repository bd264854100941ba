use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_editor::api_client::{build_client, HttpCollection};
use resume_editor::config::{Config, TimelineSettings};
use resume_editor::draft::DocumentStore;
use resume_editor::models::{
    Award, CustomItem, Education, Language, Project, ResumeDocument, SectionEntity, SectionKind,
    SectionList, SectionOverlay, Skill, Work,
};
use resume_editor::timeline::{TimelineController, TimelineEntity, TimelineOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_editor={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting résumé editor v{}", env!("CARGO_PKG_VERSION"));
    info!("API base URL: {}", config.api_base_url);

    let client = build_client(config.http_timeout()).context("Failed to build HTTP client")?;
    let settings = config.timeline_settings();
    let store = DocumentStore::create(ResumeDocument::default());

    for kind in &config.sections {
        let loaded = match kind {
            SectionKind::Education => {
                load_section::<Education>(&client, &config, &settings, &store, *kind).await
            }
            SectionKind::Work => load_section::<Work>(&client, &config, &settings, &store, *kind).await,
            SectionKind::Projects => {
                load_section::<Project>(&client, &config, &settings, &store, *kind).await
            }
            SectionKind::Awards => {
                load_section::<Award>(&client, &config, &settings, &store, *kind).await
            }
            SectionKind::Languages => {
                load_section::<Language>(&client, &config, &settings, &store, *kind).await
            }
            SectionKind::Skills => {
                load_section::<Skill>(&client, &config, &settings, &store, *kind).await
            }
            SectionKind::Custom => {
                load_section::<CustomItem>(&client, &config, &settings, &store, *kind).await
            }
        };
        if let Err(e) = loaded {
            warn!("Skipping section '{kind}': {e:#}");
        }
    }

    let document = store.snapshot()?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    store.dispose();

    Ok(())
}

/// Loads one collection through a timeline controller, logs its display rows
/// and writes the section (items plus default overlay) into the store.
async fn load_section<T>(
    client: &Client,
    config: &Config,
    settings: &TimelineSettings,
    store: &DocumentStore,
    kind: SectionKind,
) -> Result<()>
where
    T: TimelineEntity + SectionEntity,
{
    let api = HttpCollection::<T>::for_entity(client.clone(), &config.api_base_url);
    let mut controller = TimelineController::new(api, TimelineOptions::for_entity(), settings);
    controller.load().await;

    if let Some(error) = controller.error() {
        anyhow::bail!("{error}");
    }

    let list = SectionList::with_defaults(controller.items().to_vec())
        .with_context(|| format!("Invalid label config for section '{kind}'"))?;
    info!("{} ({} entries)", list.title(), controller.items().len());
    for row in controller.timeline_items() {
        info!("  {} | {}", row.title, row.details.join(" | "));
    }

    store.replace_section(kind.as_str(), serde_json::to_value(&list)?)?;
    store.set_path(
        &format!("metadata.loaded.{}", kind.as_str()),
        json!(controller.items().len()),
    )?;
    Ok(())
}
