use thiserror::Error;

/// Top-level error type for the `cvaas-api` crate.
///
/// Covers transport, TLS, server status and decoding failures for both
/// streaming and unary calls. `cvaas-core` maps these into its own taxonomy
/// depending on which operation was running.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint cannot be used as a gateway root.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The bearer token cannot be carried in an HTTP header.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Status reported by the service, either as a non-2xx response or as
    /// an in-band `error` frame on a stream.
    #[error("RPC error ({}): {message}", status_label(.code))]
    Rpc {
        code: i32,
        message: String,
        /// HTTP status, when the error came back as a response status.
        status: Option<u16>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON (de)serialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the channel could not be established at all,
    /// including endpoints that cannot be dialled.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect(),
            Self::Tls(_) | Self::InvalidEndpoint(_) | Self::InvalidUrl(_) => true,
            _ => false,
        }
    }
}

/// Canonical name of an RPC status code.
pub fn code_name(code: i32) -> &'static str {
    match code {
        0 => "OK",
        1 => "CANCELLED",
        3 => "INVALID_ARGUMENT",
        4 => "DEADLINE_EXCEEDED",
        5 => "NOT_FOUND",
        6 => "ALREADY_EXISTS",
        7 => "PERMISSION_DENIED",
        8 => "RESOURCE_EXHAUSTED",
        9 => "FAILED_PRECONDITION",
        10 => "ABORTED",
        11 => "OUT_OF_RANGE",
        12 => "UNIMPLEMENTED",
        13 => "INTERNAL",
        14 => "UNAVAILABLE",
        15 => "DATA_LOSS",
        16 => "UNAUTHENTICATED",
        _ => "UNKNOWN",
    }
}

fn status_label(code: &i32) -> &'static str {
    code_name(*code)
}
