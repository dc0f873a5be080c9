// HTTP client for the CloudVision resource API gateway.
//
// Base path: /api/resources/
// Auth: Authorization: Bearer <token>

use futures_util::StreamExt;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::channel::{Resource, ResourceChannel, ResultStream};
use crate::error::Error;
use crate::frame::{self, RpcStatus};
use crate::transport::TransportConfig;

/// Async client for the resource API gateway.
///
/// Streams are opened with `POST {resource}/all` and decoded frame by frame;
/// config writes are `POST {resource}` with the config value as body.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// The token is injected as a sensitive default header on every request.
    pub fn from_token(
        endpoint: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_authenticated_client(token)?;
        Self::from_reqwest(endpoint, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(endpoint: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(endpoint)?;
        Ok(Self { http, base_url })
    }

    /// Turn the endpoint as written in the URL file into a base URL.
    ///
    /// `host:port` targets get an `https://` scheme. Explicit schemes are
    /// kept; plaintext `http://` is allowed for local gateways.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let raw = raw.trim();
        let mut url = if raw.contains("://") {
            Url::parse(raw)?
        } else {
            Url::parse(&format!("https://{raw}"))?
        };

        match url.scheme() {
            "https" => {}
            "http" => warn!(endpoint = %url, "using a plaintext endpoint"),
            other => {
                return Err(Error::InvalidEndpoint(format!(
                    "unsupported scheme '{other}'"
                )));
            }
        }

        // Uniform trailing slash so that `join` appends instead of replacing.
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized endpoint root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<RpcStatus>(&raw) {
            Ok(rpc) if !rpc.message.is_empty() => Error::Rpc {
                code: rpc.code,
                message: rpc.message,
                status: Some(status.as_u16()),
            },
            _ => Error::Rpc {
                code: code_for_status(status),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                status: Some(status.as_u16()),
            },
        }
    }
}

/// RPC status implied by an HTTP status when the body carries none.
fn code_for_status(status: reqwest::StatusCode) -> i32 {
    match status.as_u16() {
        400 => 3,
        401 => 16,
        403 => 7,
        404 => 5,
        409 => 6,
        429 => 8,
        501 => 12,
        503 => 14,
        504 => 4,
        _ => 2,
    }
}

impl ResourceChannel for GatewayClient {
    async fn get_all(
        &self,
        resource: Resource,
        request: serde_json::Value,
    ) -> Result<ResultStream<'_>, Error> {
        debug!(%resource, filter = %request, "opening stream");
        let resp = self.post(&resource.get_all_path(), &request).await?;
        Ok(frame::decode_frames(resp.bytes_stream()).boxed())
    }

    async fn set(
        &self,
        resource: Resource,
        value: serde_json::Value,
    ) -> Result<serde_json::Value, Error> {
        debug!(%resource, "issuing set");
        let resp = self.post(resource.path(), &value).await?;
        let body = resp.text().await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_port_gets_https() {
        let url = GatewayClient::normalize_base_url("www.arista.io:443").unwrap();
        assert_eq!(url.as_str(), "https://www.arista.io/");
    }

    #[test]
    fn explicit_url_keeps_its_path_prefix() {
        let url = GatewayClient::normalize_base_url("https://cv.example.com/tenant/").unwrap();
        assert_eq!(
            url.join(Resource::Device.path()).unwrap().as_str(),
            "https://cv.example.com/tenant/api/resources/inventory/v1/Device"
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(GatewayClient::normalize_base_url("ftp://cv.example.com").is_err());
    }

    #[test]
    fn http_statuses_map_to_rpc_codes() {
        assert_eq!(code_for_status(reqwest::StatusCode::UNAUTHORIZED), 16);
        assert_eq!(code_for_status(reqwest::StatusCode::NOT_FOUND), 5);
        assert_eq!(code_for_status(reqwest::StatusCode::IM_A_TEAPOT), 2);
    }
}
