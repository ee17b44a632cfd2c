//! `download`: fetch one department report, optionally converting it

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;
use colored::*;

use super::{Target, build_client};
use crate::config::Config;
use crate::excel::convert_xlsx_to_csv;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Department code (1-25) or name
    pub department: String,

    /// Output directory (default: data/<department>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Convert the downloaded workbook to CSV
    #[arg(long)]
    pub csv: bool,

    /// Keep report preamble rows when converting
    #[arg(long)]
    pub no_clean: bool,
}

pub async fn handle_download_command(args: DownloadArgs, config: &Config) -> Result<()> {
    let target = Target::resolve(&args.department)?;
    let output_dir = args.output.unwrap_or_else(|| target.default_dir());
    let client = build_client(config)?;

    println!("Downloading investments for {}...", target.display_name().cyan());

    let xlsx_path = client
        .download(&target.selector, &output_dir)
        .await
        .map_err(|e| anyhow!("Failed to download {}: {}", target.display_name(), e))?;

    println!("{} Report saved to {}", "✓".green(), xlsx_path.display());

    if args.csv {
        let csv_path = target.csv_path(&output_dir);
        let report = convert_xlsx_to_csv(&xlsx_path, Some(&csv_path), !args.no_clean)
            .inspect_err(|e| log::error!("Failed to convert {}: {:#}", xlsx_path.display(), e))?;
        println!("{} Data available in {}", "✓".green(), report.csv_path.display());
    }

    Ok(())
}
