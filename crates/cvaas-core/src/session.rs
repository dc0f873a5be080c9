// ── Session bootstrap and operations ──
//
// A session is one authenticated channel plus the deadline every call on it
// shares. Reads go filter -> stream -> drain; writes are a single `Set`.

use std::path::Path;
use std::time::Duration;

use cvaas_api::resources::inventory::Device;
use cvaas_api::resources::workspace::Workspace;
use cvaas_api::{GatewayClient, Resource, ResourceChannel, TransportConfig};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::deadline::{CancelHandle, DEFAULT_TIMEOUT, Deadline};
use crate::error::CoreError;
use crate::filter::{DeviceCriteria, build_workspace_filter};
use crate::model::{DeviceRecord, WorkspaceRecord};
use crate::mutation::{self, Ack, Tag};
use crate::stream::drain;

// ── Credentials ──────────────────────────────────────────────────────

/// Bearer token and endpoint, read once per invocation.
#[derive(Debug)]
pub struct Credentials {
    token: SecretString,
    endpoint: String,
}

impl Credentials {
    pub fn new(token: SecretString, endpoint: impl Into<String>) -> Self {
        Self {
            token,
            endpoint: endpoint.into(),
        }
    }

    /// Load the token and endpoint from their single-line files.
    pub fn load(token_path: &Path, endpoint_path: &Path) -> Result<Self, CoreError> {
        let token = read_first_line(token_path)?;
        let endpoint = read_first_line(endpoint_path)?;
        Ok(Self::new(SecretString::from(token), endpoint))
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// First non-blank line of a file, trimmed.
fn read_first_line(path: &Path) -> Result<String, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::CredentialLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| CoreError::CredentialLoad {
            path: path.to_path_buf(),
            reason: "file is empty".into(),
        })
}

// ── Bootstrap ────────────────────────────────────────────────────────

/// Knobs for [`connect`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Budget for the whole session, measured from `connect`.
    pub timeout: Duration,
    pub transport: TransportConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            transport: TransportConfig::default(),
        }
    }
}

/// Read credentials and open a session against the gateway.
///
/// No request is sent here; an unreachable endpoint surfaces as
/// [`CoreError::Connection`] on the first call.
pub fn connect(
    token_path: &Path,
    endpoint_path: &Path,
    options: &SessionOptions,
) -> Result<(Session<GatewayClient>, CancelHandle), CoreError> {
    let credentials = Credentials::load(token_path, endpoint_path)?;
    connect_with(&credentials, options)
}

/// Open a session from already loaded credentials.
pub fn connect_with(
    credentials: &Credentials,
    options: &SessionOptions,
) -> Result<(Session<GatewayClient>, CancelHandle), CoreError> {
    let client = GatewayClient::from_token(
        credentials.endpoint(),
        credentials.token(),
        &options.transport,
    )
    .map_err(CoreError::Connection)?;

    info!(
        endpoint = %client.base_url(),
        timeout_secs = options.timeout.as_secs(),
        "session opened"
    );
    Ok(Session::new(client, options.timeout))
}

// ── Session ──────────────────────────────────────────────────────────

/// An authenticated channel bounded by one deadline.
pub struct Session<C> {
    channel: C,
    deadline: Deadline,
}

impl<C: ResourceChannel> Session<C> {
    /// Wrap a channel, starting the session clock now.
    pub fn new(channel: C, timeout: Duration) -> (Self, CancelHandle) {
        let (deadline, handle) = Deadline::start(timeout);
        (Self { channel, deadline }, handle)
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// List devices matching the criteria, in stream order.
    ///
    /// Conflicting feature flags are rejected before anything is sent.
    pub async fn list_devices(&self, criteria: &DeviceCriteria) -> Result<Vec<DeviceRecord>, CoreError> {
        let request = criteria.to_request()?;
        self.read_all::<Device, DeviceRecord, _>(Resource::Device, &request)
            .await
    }

    /// List workspaces, optionally restricted to one lifecycle state.
    pub async fn list_workspaces(&self, state: Option<&str>) -> Result<Vec<WorkspaceRecord>, CoreError> {
        let request = build_workspace_filter(state)?;
        self.read_all::<Workspace, WorkspaceRecord, _>(Resource::Workspace, &request)
            .await
    }

    async fn read_all<W, R, Q>(&self, resource: Resource, request: &Q) -> Result<Vec<R>, CoreError>
    where
        W: DeserializeOwned,
        R: From<W>,
        Q: Serialize,
    {
        let body = serde_json::to_value(request)?;
        debug!(%resource, filter = %body, "reading");

        let stream = self
            .deadline
            .run(self.channel.get_all(resource, body))
            .await?
            .map_err(|e| CoreError::from_stream_open(resource, e))?;

        drain::<W, R>(resource, stream, &self.deadline).await
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub async fn create_workspace(
        &self,
        workspace_id: &str,
        request_id: &str,
        display_name: &str,
    ) -> Result<Ack, CoreError> {
        let config = mutation::workspace_config(workspace_id, request_id, display_name);
        self.set(Resource::WorkspaceConfig, &config).await
    }

    pub async fn create_tag(&self, tag: &Tag) -> Result<Ack, CoreError> {
        self.set(Resource::TagConfig, &mutation::tag_config(tag)).await
    }

    pub async fn assign_tag(&self, tag: &Tag, device_id: &str) -> Result<Ack, CoreError> {
        let config = mutation::tag_assignment_config(tag, device_id);
        self.set(Resource::TagAssignmentConfig, &config).await
    }

    async fn set<V: Serialize>(&self, resource: Resource, value: &V) -> Result<Ack, CoreError> {
        let body = serde_json::to_value(value)?;
        let ack = self
            .deadline
            .run(self.channel.set(resource, body))
            .await?
            .map_err(CoreError::from_unary)?;

        info!(%resource, "set acknowledged");
        Ok(Ack(ack))
    }
}
