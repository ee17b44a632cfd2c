//! `publish`: push a JSON document to the Realtime Database

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::{Config, PublishConfig};
use crate::publish::{FirebaseStore, publish_file};

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// JSON document produced by `reshape`
    pub input: PathBuf,

    /// Database root URL (overrides config and FIREBASE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Auth token (overrides config and FIREBASE_AUTH)
    #[arg(long)]
    pub auth: Option<String>,
}

pub(crate) fn effective_publish_config(
    config: &Config,
    database_url: Option<String>,
    auth: Option<String>,
) -> PublishConfig {
    PublishConfig {
        database_url: database_url.or_else(|| config.publish.database_url.clone()),
        auth_token: auth.or_else(|| config.publish.auth_token.clone()),
    }
}

pub async fn handle_publish_command(args: PublishArgs, config: &Config) -> Result<()> {
    let publish_config = effective_publish_config(config, args.database_url, args.auth);
    let store = FirebaseStore::from_config(&publish_config)?;

    let report = publish_file(&args.input, &store).await?;

    println!(
        "{} Published {} categories and {} projects from {}",
        "✓".green(),
        report.categories,
        report.projects,
        args.input.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.publish.database_url = Some("https://config.firebaseio.com".to_string());
        config.publish.auth_token = Some("config-token".to_string());

        let merged = effective_publish_config(&config, Some("https://flag.firebaseio.com".to_string()), None);

        assert_eq!(merged.database_url.as_deref(), Some("https://flag.firebaseio.com"));
        assert_eq!(merged.auth_token.as_deref(), Some("config-token"));
    }
}
