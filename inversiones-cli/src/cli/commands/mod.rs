//! Command handlers

pub mod convert;
pub mod download;
pub mod download_all;
pub mod publish;
pub mod reshape;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::api::{MefClient, ResilienceConfig};
use crate::config::Config;
use crate::departments::{self, Department};

use super::Commands;

pub use convert::ConvertArgs;
pub use download::DownloadArgs;
pub use download_all::DownloadAllArgs;
pub use publish::PublishArgs;
pub use reshape::ReshapeArgs;
pub use run::RunArgs;

/// Base directory for downloads when none is given
pub const DEFAULT_DATA_DIR: &str = "data";

pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Download(args) => download::handle_download_command(args, config).await,
        Commands::DownloadAll(args) => download_all::handle_download_all_command(args, config).await,
        Commands::Convert(args) => convert::handle_convert_command(args),
        Commands::Reshape(args) => reshape::handle_reshape_command(args, config),
        Commands::Publish(args) => publish::handle_publish_command(args, config).await,
        Commands::Run(args) => run::handle_run_command(args, config).await,
    }
}

pub(crate) fn build_client(config: &Config) -> Result<MefClient> {
    let resilience = ResilienceConfig::from_fetch_config(&config.fetch);
    MefClient::from_config(&config.fetch.endpoint, &resilience)
}

/// A department as named on the command line
#[derive(Debug, Clone)]
pub(crate) struct Target {
    /// Value sent as the request's department selector
    pub selector: String,
    pub department: Option<&'static Department>,
}

impl Target {
    /// Codes are sent as typed ("4" and "04" are both accepted upstream);
    /// names are translated to their table code.
    pub fn resolve(input: &str) -> Result<Self> {
        let input = input.trim();
        let department = departments::find(input);
        let is_code = input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty();

        match (is_code, department) {
            (true, department) => {
                if department.is_none() {
                    log::warn!("Department code {} is not in the known table (01-25)", input);
                }
                Ok(Self {
                    selector: input.to_string(),
                    department,
                })
            }
            (false, Some(department)) => Ok(Self {
                selector: department.code.to_string(),
                department: Some(department),
            }),
            (false, None) => bail!("Unknown department: {}", input),
        }
    }

    /// File-name friendly label: the department slug, or the raw selector
    pub fn label(&self) -> String {
        self.department
            .map(Department::slug)
            .unwrap_or_else(|| self.selector.clone())
    }

    pub fn display_name(&self) -> String {
        match self.department {
            Some(d) => format!("{} ({})", d.name, self.selector),
            None => self.selector.clone(),
        }
    }

    pub fn default_dir(&self) -> PathBuf {
        Path::new(DEFAULT_DATA_DIR).join(self.label())
    }

    pub fn csv_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("inversiones_{}.csv", self.label()))
    }
}
