// ── arista.tag.v2 ──

use serde::{Deserialize, Serialize};

/// Identity of a tag within a workspace.
///
/// `element_type` and `element_sub_type` are passed through as the raw
/// enum codes the caller supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagKey {
    pub workspace_id: String,
    pub element_type: i32,
    pub element_sub_type: i32,
    pub label: String,
    pub value: String,
}

/// Value written by `TagConfigService.Set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagConfig {
    pub key: TagKey,
    pub remove: bool,
}

/// Identity of a tag attached to one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssignmentKey {
    pub workspace_id: String,
    pub element_type: i32,
    pub element_sub_type: i32,
    pub label: String,
    pub value: String,
    pub device_id: String,
}

/// Value written by `TagAssignmentConfigService.Set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssignmentConfig {
    pub key: TagAssignmentKey,
    pub remove: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn assignment_key_carries_device_id() {
        let config = TagAssignmentConfig {
            key: TagAssignmentKey {
                workspace_id: "ws-1".into(),
                element_type: 1,
                element_sub_type: 1,
                label: "eos_version".into(),
                value: "EOS-64".into(),
                device_id: "JPE123".into(),
            },
            remove: false,
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "key": {
                    "workspaceId": "ws-1",
                    "elementType": 1,
                    "elementSubType": 1,
                    "label": "eos_version",
                    "value": "EOS-64",
                    "deviceId": "JPE123"
                },
                "remove": false
            })
        );
    }
}
