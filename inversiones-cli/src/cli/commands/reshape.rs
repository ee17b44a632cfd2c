//! `reshape`: report CSV to Category/Projects JSON

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::Config;
use crate::reshape::reshape_csv_to_json;

#[derive(Args, Debug)]
pub struct ReshapeArgs {
    /// Input CSV file produced by `convert`
    pub input: PathBuf,

    /// Output JSON file (default: input with a .json extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_reshape_command(args: ReshapeArgs, config: &Config) -> Result<()> {
    let summary = reshape_csv_to_json(&args.input, args.output.as_deref(), &config.reshape)?;

    println!(
        "{} {} rows -> {} projects, {} categories saved to {}",
        "✓".green(),
        summary.rows_read,
        summary.projects,
        summary.categories,
        summary.json_path.display()
    );
    if summary.id_collisions > 0 {
        println!(
            "{} {} rows were replaced by later rows with the same generated id",
            "!".yellow(),
            summary.id_collisions
        );
    }
    Ok(())
}
