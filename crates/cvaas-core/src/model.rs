// ── Result records ──
//
// Flat, display-ready views of streamed resources. Enum values are spelled
// the way the service prints them (`STREAMING_STATUS_ACTIVE`), with unknown
// codes as the bare number.

use cvaas_api::resources::inventory::{Device, StreamingStatus, reported_feature};
use cvaas_api::resources::workspace::{Workspace, WorkspaceState};
use serde::{Deserialize, Serialize};

/// One device from the inventory stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub device_id: String,
    pub hostname: String,
    pub model: String,
    pub software_version: String,
    pub system_mac: String,
    pub streaming_status: String,
    pub danz_enabled: bool,
    pub mlag_enabled: bool,
}

impl From<Device> for DeviceRecord {
    fn from(d: Device) -> Self {
        let danz_enabled = d.feature_enabled(reported_feature::DANZ);
        let mlag_enabled = d.feature_enabled(reported_feature::MLAG);
        Self {
            device_id: d.key.map(|k| k.device_id).unwrap_or_default(),
            hostname: d.hostname.unwrap_or_default(),
            model: d.model_name.unwrap_or_default(),
            software_version: d.software_version.unwrap_or_default(),
            system_mac: d.system_mac_address.unwrap_or_default(),
            streaming_status: d
                .streaming_status
                .unwrap_or(StreamingStatus::Unspecified)
                .proto_name(),
            danz_enabled,
            mlag_enabled,
        }
    }
}

/// One workspace from the workspace stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub workspace_id: String,
    pub display_name: String,
    pub state: String,
}

impl From<Workspace> for WorkspaceRecord {
    fn from(w: Workspace) -> Self {
        Self {
            workspace_id: w.key.map(|k| k.workspace_id).unwrap_or_default(),
            display_name: w.display_name.unwrap_or_default(),
            state: w.state.unwrap_or(WorkspaceState::Unspecified).proto_name(),
        }
    }
}
