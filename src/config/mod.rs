mod file_config;

pub use file_config::FileConfig;

use crate::catalog::MovieCatalog;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub log_level: String,
    pub history_size: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present. Without any explicit
    /// catalog path, a `movies.json` in the current directory or its ancestors
    /// is used.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        Self::resolve_with(cli, file_config, MovieCatalog::infer_path)
    }

    fn resolve_with(
        cli: &CliConfig,
        file_config: Option<FileConfig>,
        infer_path: impl FnOnce() -> Option<PathBuf>,
    ) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .or_else(infer_path)
            .ok_or_else(|| {
                anyhow!(
                    "Could not infer the catalog file, please specify it explicitly or set catalog_path in the config file."
                )
            })?;

        let log_level = file
            .log_level
            .or_else(|| cli.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let history_size = file.history_size.unwrap_or(DEFAULT_HISTORY_SIZE);

        Ok(Self {
            catalog_path,
            log_level,
            history_size,
        })
    }
}
