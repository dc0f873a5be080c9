//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use cvaas_core::CoreError;

/// Process exit codes. Success is 0.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

/// RPC status for a missing or invalid bearer token.
const UNAUTHENTICATED: i32 = 16;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("Missing --{flag} file")]
    #[diagnostic(
        code(cvaas::missing_credentials),
        help("Pass --{flag} <FILE> or set {env}.")
    )]
    MissingCredentialFile { flag: &'static str, env: &'static str },

    #[error("Cannot load credentials from {path}")]
    #[diagnostic(
        code(cvaas::credential_load),
        help("The file must exist and hold the value on its first non-empty line.\n{reason}")
    )]
    CredentialLoad { path: String, reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cvaas::auth_failed),
        help("Check that the token file holds a valid, unexpired service account token.")
    )]
    AuthFailed { message: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the service")]
    #[diagnostic(
        code(cvaas::connection_failed),
        help(
            "Check the endpoint in the --url file and network access to it.\n\
             Use --ca-cert for gateways signed by a private CA."
        )
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    #[error("Session timed out after {seconds}s")]
    #[diagnostic(
        code(cvaas::timeout),
        help("Increase the session budget with --timeout.")
    )]
    Timeout { seconds: u64 },

    // ── Remote ───────────────────────────────────────────────────────
    #[error("Request rejected by the service")]
    #[diagnostic(code(cvaas::rejected))]
    Rejected {
        #[source]
        source: CoreError,
    },

    #[error("Could not read the result stream")]
    #[diagnostic(code(cvaas::stream_read))]
    StreamRead {
        #[source]
        source: CoreError,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cvaas::validation))]
    Validation { field: String, reason: String },

    #[error("No value for {field}")]
    #[diagnostic(
        code(cvaas::prompt),
        help("Pass --{field} on the command line when not running interactively.")
    )]
    Prompt {
        field: &'static str,
        #[source]
        source: dialoguer::Error,
    },

    // ── Ledger ───────────────────────────────────────────────────────
    #[error("Cannot update workspace ledger at {path}: {reason}")]
    #[diagnostic(code(cvaas::ledger))]
    Ledger { path: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(cvaas::config))]
    Config(Box<figment::Error>),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Operation failed: {source}")]
    #[diagnostic(code(cvaas::internal))]
    Internal {
        #[source]
        source: CoreError,
    },

    // ── Serialization ────────────────────────────────────────────────
    #[error("Cannot render JSON: {0}")]
    #[diagnostic(code(cvaas::json))]
    Json(#[from] serde_json::Error),

    #[error("Cannot render YAML: {0}")]
    #[diagnostic(code(cvaas::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredentialFile { .. } | Self::Validation { .. } | Self::Prompt { .. } => {
                exit_code::USAGE
            }
            Self::CredentialLoad { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Rejected { .. } => exit_code::REJECTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CredentialLoad { path, reason } => CliError::CredentialLoad {
                path: path.display().to_string(),
                reason,
            },

            CoreError::Connection(_) => CliError::ConnectionFailed { source: err },

            CoreError::ConflictingFilter { .. } => CliError::Validation {
                field: "filter".into(),
                reason: err.to_string(),
            },

            CoreError::InvalidFilterValue { field, value } => CliError::Validation {
                field: field.into(),
                reason: format!(
                    "unknown value '{value}' (expected UNSPECIFIED, PENDING, SUBMITTED, \
                     ABANDONED, CONFLICTS, ROLLED_BACK or NONE)"
                ),
            },

            CoreError::RemoteRejection { code, message } if code == UNAUTHENTICATED => {
                CliError::AuthFailed { message }
            }

            CoreError::RemoteRejection { .. } => CliError::Rejected { source: err },

            CoreError::StreamRead { .. } => CliError::StreamRead { source: err },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::RequestEncoding(_) | CoreError::Cancelled => {
                CliError::Internal { source: err }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_filters_are_usage_errors() {
        let err = CliError::from(CoreError::ConflictingFilter {
            first: "mlag",
            second: "danz",
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn unauthenticated_rejection_is_an_auth_failure() {
        let err = CliError::from(CoreError::RemoteRejection {
            code: UNAUTHENTICATED,
            message: "invalid token".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn other_rejections_keep_their_own_code() {
        let err = CliError::from(CoreError::RemoteRejection {
            code: 6,
            message: "exists".into(),
        });
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }

    #[test]
    fn timeout_keeps_the_budget() {
        let err = CliError::from(CoreError::Timeout { timeout_secs: 30 });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
        assert_eq!(err.to_string(), "Session timed out after 30s");
    }
}
