// ── Mutation requests ──
//
// Config values for the unary `Set` calls. Every field is passed through
// verbatim and `remove` is always false: these calls only ever create.

use std::fmt;

use cvaas_api::resources::tag::{TagAssignmentConfig, TagAssignmentKey, TagConfig, TagKey};
use cvaas_api::resources::workspace::{RequestParams, WorkspaceConfig, WorkspaceKey};
use serde::{Deserialize, Serialize};

/// A tag definition within a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub workspace_id: String,
    pub label: String,
    pub value: String,
    pub element_type: i32,
    pub element_subtype: i32,
}

/// The service's reply to a `Set` call, kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

/// Request id for a new workspace, derived from the current time.
pub fn request_id() -> String {
    format!("req-{}", chrono::Utc::now().timestamp())
}

pub fn workspace_config(workspace_id: &str, request_id: &str, display_name: &str) -> WorkspaceConfig {
    WorkspaceConfig {
        key: WorkspaceKey {
            workspace_id: workspace_id.to_owned(),
        },
        display_name: display_name.to_owned(),
        request_params: RequestParams {
            request_id: request_id.to_owned(),
        },
    }
}

pub fn tag_config(tag: &Tag) -> TagConfig {
    TagConfig {
        key: TagKey {
            workspace_id: tag.workspace_id.clone(),
            element_type: tag.element_type,
            element_sub_type: tag.element_subtype,
            label: tag.label.clone(),
            value: tag.value.clone(),
        },
        remove: false,
    }
}

pub fn tag_assignment_config(tag: &Tag, device_id: &str) -> TagAssignmentConfig {
    TagAssignmentConfig {
        key: TagAssignmentKey {
            workspace_id: tag.workspace_id.clone(),
            element_type: tag.element_type,
            element_sub_type: tag.element_subtype,
            label: tag.label.clone(),
            value: tag.value.clone(),
            device_id: device_id.to_owned(),
        },
        remove: false,
    }
}
