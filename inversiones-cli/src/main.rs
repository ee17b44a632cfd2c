mod api;
mod cli;
mod config;
mod departments;
mod excel;
mod publish;
mod reshape;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Using MEF endpoint {}", config.fetch.endpoint);

    cli::commands::dispatch(cli.command, &config).await
}

/// `RUST_LOG` wins; otherwise info, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}
