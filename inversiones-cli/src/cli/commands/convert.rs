//! `convert`: XLSX report to CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::excel::convert_xlsx_to_csv;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input XLSX file
    pub input: PathBuf,

    /// Output CSV file (default: input with a .csv extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable automatic removal of report metadata rows
    #[arg(long)]
    pub no_clean: bool,
}

pub fn handle_convert_command(args: ConvertArgs) -> Result<()> {
    let report = convert_xlsx_to_csv(&args.input, args.output.as_deref(), !args.no_clean)
        .inspect_err(|e| log::error!("Failed to convert {}: {:#}", args.input.display(), e))?;

    println!(
        "{} Converted {} ({} rows from sheet row {}, {} preamble rows dropped)",
        "✓".green(),
        report.csv_path.display(),
        report.rows_written,
        report.header_row,
        report.rows_skipped
    );
    Ok(())
}
