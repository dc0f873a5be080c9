// ── arista.workspace.v1 ──

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

use super::{ProtoEnum, deserialize_proto_enum, serialize_proto_enum, unrecognized_code};

/// Lifecycle state of a workspace.
///
/// Numbering is fixed by the service. `Unrecognized` carries any code this
/// client does not know; parsed from its name it is the `-1` catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceState {
    Unspecified,
    Pending,
    Submitted,
    Abandoned,
    Conflicts,
    RolledBack,
    #[strum(default_with = "unrecognized_code")]
    Unrecognized(i32),
}

impl ProtoEnum for WorkspaceState {
    const PREFIX: &'static str = "WORKSPACE_STATE_";

    fn code(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Pending => 1,
            Self::Submitted => 2,
            Self::Abandoned => 3,
            Self::Conflicts => 4,
            Self::RolledBack => 5,
            Self::Unrecognized(code) => code,
        }
    }

    fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unspecified,
            1 => Self::Pending,
            2 => Self::Submitted,
            3 => Self::Abandoned,
            4 => Self::Conflicts,
            5 => Self::RolledBack,
            other => Self::Unrecognized(other),
        }
    }

    fn is_unrecognized(self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl WorkspaceState {
    /// Numeric code used on the wire.
    pub fn code(self) -> i32 {
        ProtoEnum::code(self)
    }

    /// Name as the service prints it (`WORKSPACE_STATE_PENDING`, or `42`
    /// for an unknown code).
    pub fn proto_name(self) -> String {
        ProtoEnum::proto_name(self)
    }
}

impl Serialize for WorkspaceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_proto_enum(self, serializer)
    }
}

impl<'de> Deserialize<'de> for WorkspaceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_proto_enum(deserializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceKey {
    #[serde(default)]
    pub workspace_id: String,
}

/// A workspace as streamed by `WorkspaceService.GetAll`.
///
/// Every field is optional so the same shape doubles as a partial-equality
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<WorkspaceKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WorkspaceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
}

/// Request body of `WorkspaceService.GetAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStreamRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partial_eq_filter: Vec<Workspace>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub request_id: String,
}

/// Value written by `WorkspaceConfigService.Set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    pub key: WorkspaceKey,
    pub display_name: String,
    pub request_params: RequestParams,
}
