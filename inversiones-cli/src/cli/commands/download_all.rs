//! `download-all`: every department, sequentially

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use colored::*;

use super::{DEFAULT_DATA_DIR, build_client};
use crate::config::Config;
use crate::departments::DEPARTMENTS;
use crate::excel::convert_xlsx_to_csv;

#[derive(Args, Debug)]
pub struct DownloadAllArgs {
    /// Base output directory; each department gets a subdirectory
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub output: PathBuf,

    /// Convert each downloaded workbook to CSV
    #[arg(long)]
    pub csv: bool,
}

pub async fn handle_download_all_command(args: DownloadAllArgs, config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let mut successful = 0;
    let mut failed = 0;

    for department in DEPARTMENTS.iter() {
        println!();
        println!("[{}] Downloading {}...", department.code, department.name.cyan());

        let dept_dir = args.output.join(department.slug());
        match client.download(department.code, &dept_dir).await {
            Ok(xlsx_path) => {
                successful += 1;

                if args.csv {
                    let csv_path = dept_dir.join(format!("inversiones_{}.csv", department.slug()));
                    // A failed conversion does not count against the download
                    if let Err(e) = convert_xlsx_to_csv(&xlsx_path, Some(&csv_path), true) {
                        log::error!("Failed to convert {}: {:#}", xlsx_path.display(), e);
                    }
                }
            }
            Err(e) => {
                failed += 1;
                log::debug!("{} failed: {}", department.name, e);
                println!("{} Failed to download {}", "✗".red(), department.name);
            }
        }
    }

    let rule = "=".repeat(50);
    println!();
    println!("{}", rule);
    println!(
        "Summary: {} succeeded, {} failed",
        successful.to_string().green(),
        failed.to_string().red()
    );
    println!("{}", rule);

    if successful == 0 {
        bail!("No department could be downloaded");
    }
    Ok(())
}
