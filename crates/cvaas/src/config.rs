//! Settings resolution: defaults, config file, environment, then flags.
//!
//! The optional TOML file lives in the platform config directory
//! (`~/.config/cvaas/config.toml` on Linux). Every key can also be set via
//! a `CVAAS_*` environment variable, and global flags win over both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Keys accepted in the config file and environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileConfig {
    /// Session timeout in seconds.
    pub timeout: u64,
    /// Default output format name.
    pub output: String,
    /// Workspace ledger path.
    pub ledger: Option<PathBuf>,
    /// Extra CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            timeout: cvaas_core::DEFAULT_TIMEOUT.as_secs(),
            output: "table".into(),
            ledger: None,
            ca_cert: None,
        }
    }
}

/// Fully resolved settings, passed by reference to every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub timeout: Duration,
    pub output: OutputFormat,
    pub ledger: PathBuf,
    pub ca_cert: Option<PathBuf>,
    pub quiet: bool,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "cvaas", "cvaas")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(".cvaas").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the workspace ledger.
pub fn default_ledger_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("workspaces.yaml"),
        |dirs| dirs.data_dir().join("workspaces.yaml"),
    )
}

/// Load the file + environment layers.
pub fn load_file_config(path: &Path) -> Result<FileConfig, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(FileConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CVAAS_").only(&["timeout", "output", "ledger", "ca_cert"]));

    Ok(figment.extract()?)
}

impl Settings {
    /// Resolve settings for this invocation.
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let file = load_file_config(&config_path())?;
        Self::from_layers(file, global)
    }

    /// Apply global flags on top of the file/env layers.
    pub fn from_layers(file: FileConfig, global: &GlobalOpts) -> Result<Self, CliError> {
        let output = match global.output {
            Some(format) => format,
            None => OutputFormat::from_str(&file.output, true).map_err(|reason| {
                CliError::Validation {
                    field: "output".into(),
                    reason,
                }
            })?,
        };

        let timeout_secs = global.timeout.unwrap_or(file.timeout);
        if timeout_secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            output,
            ledger: global
                .ledger
                .clone()
                .or(file.ledger)
                .unwrap_or_else(default_ledger_path),
            ca_cert: global.ca_cert.clone().or(file.ca_cert),
            quiet: global.quiet,
        })
    }
}
