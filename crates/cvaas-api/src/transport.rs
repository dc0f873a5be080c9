// Shared transport configuration for building reqwest::Client instances.
//
// Every call made on a session goes through one client carrying the
// bearer token as a default header, so the builder logic lives here.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Upper bound for establishing the TCP + TLS connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS trust configuration.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the bundled web PKI roots.
    #[default]
    System,
    /// Additionally trust the CA certificate in the given PEM file.
    CustomCa(PathBuf),
}

/// Shared transport configuration for building HTTP clients.
///
/// No per-request timeout here: the session deadline owned by `cvaas-core`
/// bounds every call, including long inventory streams.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with additional default headers.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(self.connect_timeout)
            .user_agent(concat!("cvaas/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let TlsMode::CustomCa(path) = &self.tls {
            let cert_pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&cert_pem)
                .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Build a client that sends `Authorization: Bearer <token>` on every call.
    pub fn build_authenticated_client(&self, token: &SecretString) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(bearer_headers(token)?)
    }
}

/// Default headers carrying the bearer token, marked sensitive so they never
/// show up in debug output.
pub fn bearer_headers(token: &SecretString) -> Result<HeaderMap, Error> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|e| Error::InvalidToken(e.to_string()))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
