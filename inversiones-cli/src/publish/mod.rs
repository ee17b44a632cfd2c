//! Publishing the reshaped document to the remote database
//!
//! Two wholesale overwrites, `Category` first and `Projects` second. There is
//! no rollback: if the second write fails the store keeps the new categories
//! next to the old projects.

pub mod firebase;
pub mod store;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub use firebase::FirebaseStore;
pub use store::HierarchicalStore;

pub const CATEGORY_PATH: &str = "Category";
pub const PROJECTS_PATH: &str = "Projects";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub categories: usize,
    pub projects: usize,
}

/// Load the JSON document at `json_path` and publish it
pub async fn publish_file(json_path: &Path, store: &dyn HierarchicalStore) -> Result<PublishReport> {
    let content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", json_path.display()))?;

    publish_document(&document, store).await
}

/// Overwrite both collections with the ones in `document`
pub async fn publish_document(document: &Value, store: &dyn HierarchicalStore) -> Result<PublishReport> {
    let categories = document
        .get(CATEGORY_PATH)
        .with_context(|| format!("Document has no '{}' key", CATEGORY_PATH))?;
    let projects = document
        .get(PROJECTS_PATH)
        .with_context(|| format!("Document has no '{}' key", PROJECTS_PATH))?;

    store
        .set(CATEGORY_PATH, categories)
        .await
        .context("Failed to publish categories")?;
    log::info!("Published {}", CATEGORY_PATH);

    store
        .set(PROJECTS_PATH, projects)
        .await
        .context("Failed to publish projects; categories were already replaced")?;
    log::info!("Published {}", PROJECTS_PATH);

    Ok(PublishReport {
        categories: collection_len(categories),
        projects: collection_len(projects),
    })
}

fn collection_len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        _ => 1,
    }
}
