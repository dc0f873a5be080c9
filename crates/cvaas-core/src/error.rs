// ── Core error types ──
//
// Every failure of a core operation lands in exactly one of these variants.
// Transport errors from cvaas-api are classified by the operation that was
// running: opening a stream, reading it, or issuing a unary write.

use std::path::PathBuf;

use cvaas_api::Resource;
use cvaas_api::error::code_name;
use thiserror::Error;

/// Coarse classification of a [`CoreError`], used by callers to pick an
/// exit code or message style without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    CredentialLoad,
    Connection,
    ConflictingFilter,
    InvalidFilterValue,
    RequestEncoding,
    StreamRead,
    RemoteRejection,
    Timeout,
    Cancelled,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Bootstrap ────────────────────────────────────────────────────
    #[error("Cannot load credentials from {}: {reason}", .path.display())]
    CredentialLoad { path: PathBuf, reason: String },

    #[error("Cannot reach the service: {0}")]
    Connection(#[source] cvaas_api::Error),

    // ── Filters ──────────────────────────────────────────────────────
    #[error("Filters --{first} and --{second} cannot be used together")]
    ConflictingFilter {
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid {field} filter value: {value}")]
    InvalidFilterValue { field: &'static str, value: String },

    #[error("Cannot encode request: {0}")]
    RequestEncoding(#[from] serde_json::Error),

    // ── Calls ────────────────────────────────────────────────────────
    #[error("Failed reading {resource} stream: {source}")]
    StreamRead {
        resource: Resource,
        #[source]
        source: cvaas_api::Error,
    },

    #[error("Request rejected by the service ({}): {message}", code_label(.code))]
    RemoteRejection { code: i32, message: String },

    #[error("Session deadline of {timeout_secs}s exceeded")]
    Timeout { timeout_secs: u64 },

    #[error("Session cancelled")]
    Cancelled,
}

fn code_label(code: &i32) -> &'static str {
    code_name(*code)
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialLoad { .. } => ErrorKind::CredentialLoad,
            Self::Connection(_) => ErrorKind::Connection,
            Self::ConflictingFilter { .. } => ErrorKind::ConflictingFilter,
            Self::InvalidFilterValue { .. } => ErrorKind::InvalidFilterValue,
            Self::RequestEncoding(_) => ErrorKind::RequestEncoding,
            Self::StreamRead { .. } => ErrorKind::StreamRead,
            Self::RemoteRejection { .. } => ErrorKind::RemoteRejection,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Classify a failure to open a server stream.
    ///
    /// Nothing has been read yet, so a status reply is a rejection of the
    /// request rather than a broken stream.
    pub(crate) fn from_stream_open(resource: Resource, err: cvaas_api::Error) -> Self {
        match err {
            e if e.is_connect() => Self::Connection(e),
            cvaas_api::Error::Rpc { code, message, .. } => Self::RemoteRejection { code, message },
            source => Self::StreamRead { resource, source },
        }
    }

    /// Classify a failure while reading an open stream.
    pub(crate) fn from_stream_read(resource: Resource, source: cvaas_api::Error) -> Self {
        Self::StreamRead { resource, source }
    }

    /// Classify a failed unary write.
    pub(crate) fn from_unary(err: cvaas_api::Error) -> Self {
        match err {
            cvaas_api::Error::Rpc { code, message, .. } => Self::RemoteRejection { code, message },
            cvaas_api::Error::Deserialization { message, .. } => Self::RemoteRejection {
                code: 2,
                message: format!("undecodable acknowledgement: {message}"),
            },
            other => Self::Connection(other),
        }
    }
}
