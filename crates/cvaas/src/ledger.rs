//! Local YAML record of the workspaces created through this CLI.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub workspace_id: String,
    pub request_id: String,
    pub workspace_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub workspaces: Vec<LedgerEntry>,
}

fn ledger_error(path: &Path, reason: impl ToString) -> CliError {
    CliError::Ledger {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

impl Ledger {
    /// Read the ledger; a missing or empty file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ledger_error(path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|e| ledger_error(path, e))
    }

    /// Write the ledger, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ledger_error(path, e))?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| ledger_error(path, e))?;
        std::fs::write(path, yaml).map_err(|e| ledger_error(path, e))
    }

    /// Append one entry to the ledger at `path`.
    pub fn record(path: &Path, entry: LedgerEntry) -> Result<(), CliError> {
        let mut ledger = Self::load(path)?;
        debug!(path = %path.display(), workspace = %entry.workspace_id, "recording workspace");
        ledger.workspaces.push(entry);
        ledger.save(path)
    }
}
