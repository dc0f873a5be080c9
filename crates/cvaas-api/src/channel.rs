// The seam between request construction and the wire.
//
// `cvaas-core` only ever talks to a `ResourceChannel`; the gateway client
// is the production implementation and tests substitute in-memory fakes.

use std::future::Future;

use futures_util::stream::BoxStream;

use crate::error::Error;
use crate::frame::StreamResult;

/// A server stream of decoded results, ending at clean end-of-data.
pub type ResultStream<'a> = BoxStream<'a, Result<StreamResult, Error>>;

/// The resource services this client knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Resource {
    /// `arista.inventory.v1.Device`
    Device,
    /// `arista.workspace.v1.Workspace`
    Workspace,
    /// `arista.workspace.v1.WorkspaceConfig`
    WorkspaceConfig,
    /// `arista.tag.v2.TagConfig`
    TagConfig,
    /// `arista.tag.v2.TagAssignmentConfig`
    TagAssignmentConfig,
}

impl Resource {
    /// Gateway path of the resource, relative to the endpoint root.
    pub fn path(self) -> &'static str {
        match self {
            Self::Device => "api/resources/inventory/v1/Device",
            Self::Workspace => "api/resources/workspace/v1/Workspace",
            Self::WorkspaceConfig => "api/resources/workspace/v1/WorkspaceConfig",
            Self::TagConfig => "api/resources/tag/v2/TagConfig",
            Self::TagAssignmentConfig => "api/resources/tag/v2/TagAssignmentConfig",
        }
    }

    /// Path of the server-streaming `GetAll` method.
    pub fn get_all_path(self) -> String {
        format!("{}/all", self.path())
    }
}

/// An authenticated channel able to issue resource RPCs.
pub trait ResourceChannel: Send + Sync {
    /// Open one server-streaming `GetAll` call with the given stream request.
    fn get_all(
        &self,
        resource: Resource,
        request: serde_json::Value,
    ) -> impl Future<Output = Result<ResultStream<'_>, Error>> + Send;

    /// Issue one unary `Set` call with the given config value and return the
    /// service's response payload untouched.
    fn set(
        &self,
        resource: Resource,
        value: serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;
}
