//! `run`: the whole pipeline for one department

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::*;

use super::publish::effective_publish_config;
use super::{Target, build_client};
use crate::config::Config;
use crate::excel::convert_xlsx_to_csv;
use crate::publish::{FirebaseStore, publish_file};
use crate::reshape::reshape_csv_to_json;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Department code (1-25) or name
    pub department: String,

    /// Output directory (default: data/<department>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep report preamble rows when converting
    #[arg(long)]
    pub no_clean: bool,

    /// Publish the resulting document to the Realtime Database
    #[arg(long)]
    pub publish: bool,
}

pub async fn handle_run_command(args: RunArgs, config: &Config) -> Result<()> {
    let target = Target::resolve(&args.department)?;
    let output_dir = args.output.unwrap_or_else(|| target.default_dir());

    // Fail before the slow download if publishing cannot work
    let store = if args.publish {
        Some(FirebaseStore::from_config(&effective_publish_config(config, None, None))?)
    } else {
        None
    };

    println!("[1/4] Downloading {}...", target.display_name().cyan());
    let client = build_client(config)?;
    let xlsx_path = client
        .download(&target.selector, &output_dir)
        .await
        .map_err(|e| anyhow!("Failed to download {}: {}", target.display_name(), e))?;

    println!("[2/4] Converting {}...", xlsx_path.display());
    let csv_path = target.csv_path(&output_dir);
    let conversion = convert_xlsx_to_csv(&xlsx_path, Some(&csv_path), !args.no_clean)
        .with_context(|| format!("Failed to convert {}", xlsx_path.display()))?;

    println!("[3/4] Reshaping {}...", conversion.csv_path.display());
    let summary = reshape_csv_to_json(&conversion.csv_path, None, &config.reshape)?;

    match store {
        Some(store) => {
            println!("[4/4] Publishing {}...", summary.json_path.display());
            let report = publish_file(&summary.json_path, &store).await?;
            println!(
                "{} Published {} categories and {} projects",
                "✓".green(),
                report.categories,
                report.projects
            );
        }
        None => {
            println!("[4/4] Skipping publish (pass --publish to enable)");
            println!(
                "{} {} projects, {} categories in {}",
                "✓".green(),
                summary.projects,
                summary.categories,
                summary.json_path.display()
            );
        }
    }

    Ok(())
}
