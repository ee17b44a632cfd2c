//! CSV to JSON reshaping
//!
//! Turns the normalized MEF CSV into the `{ "Category": [...], "Projects": {...} }`
//! document consumed by the mobile app's database.

pub mod builder;
pub mod fields;
pub mod models;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ReshapeConfig;

pub use builder::DocumentBuilder;
pub use models::{InvestmentDocument, SourceRow};

/// Counts reported after a reshape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeSummary {
    pub json_path: PathBuf,
    pub rows_read: usize,
    pub projects: usize,
    pub categories: usize,
    pub id_collisions: usize,
}

/// `report.csv` -> `report.json` next to it
pub fn default_json_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("json")
}

/// Build the document from every row of `csv_path`
pub fn build_document(
    csv_path: &Path,
    settings: &ReshapeConfig,
) -> Result<(InvestmentDocument, usize, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut builder = DocumentBuilder::new(settings);
    let mut rows_read = 0;

    for (idx, result) in reader.deserialize::<SourceRow>().enumerate() {
        // +2: header line, then 1-based numbering
        let row = result.with_context(|| format!("Invalid CSV row {}", idx + 2))?;
        builder.add_row(&row, fields::now_millis());
        rows_read += 1;
    }

    let collisions = builder.id_collisions();
    Ok((builder.finish(), rows_read, collisions))
}

/// Reshape `csv_path` and write the JSON document to `json_path`
pub fn reshape_csv_to_json(
    csv_path: &Path,
    json_path: Option<&Path>,
    settings: &ReshapeConfig,
) -> Result<ReshapeSummary> {
    let json_path = json_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_json_path(csv_path));

    let (document, rows_read, id_collisions) = build_document(csv_path, settings)?;
    write_document(&document, &json_path)?;

    log::info!(
        "Wrote {} projects in {} categories to {}",
        document.projects.len(),
        document.categories.len(),
        json_path.display()
    );

    Ok(ReshapeSummary {
        json_path,
        rows_read,
        projects: document.projects.len(),
        categories: document.categories.len(),
        id_collisions,
    })
}

/// Pretty-print with 4-space indentation; non-ASCII text is written as is
pub fn write_document(document: &InvestmentDocument, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    document
        .serialize(&mut serializer)
        .context("Failed to serialize investment document")?;

    writer
        .flush()
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;
    Ok(())
}
