// ── arista.inventory.v1 ──

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

use super::{ProtoEnum, deserialize_proto_enum, serialize_proto_enum, unrecognized_code};

/// Feature-map keys as written in a stream filter.
pub mod filter_feature {
    pub const MLAG: &str = "mlag";
    pub const DANZ: &str = "danz";
}

/// Feature-map keys as reported on streamed devices.
pub mod reported_feature {
    pub const MLAG: &str = "Mlag";
    pub const DANZ: &str = "Danz";
}

/// Whether a device is currently streaming telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamingStatus {
    Unspecified,
    Inactive,
    Active,
    #[strum(default_with = "unrecognized_code")]
    Unrecognized(i32),
}

impl ProtoEnum for StreamingStatus {
    const PREFIX: &'static str = "STREAMING_STATUS_";

    fn code(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Inactive => 1,
            Self::Active => 2,
            Self::Unrecognized(code) => code,
        }
    }

    fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unspecified,
            1 => Self::Inactive,
            2 => Self::Active,
            other => Self::Unrecognized(other),
        }
    }

    fn is_unrecognized(self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl StreamingStatus {
    /// Name as the service prints it (`STREAMING_STATUS_ACTIVE`).
    pub fn proto_name(self) -> String {
        ProtoEnum::proto_name(self)
    }
}

impl Serialize for StreamingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_proto_enum(self, serializer)
    }
}

impl<'de> Deserialize<'de> for StreamingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_proto_enum(deserializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceKey {
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAttributes {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub feature_enabled: BTreeMap<String, bool>,
}

/// A device as streamed by `DeviceService.GetAll`; also used as a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<DeviceKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_status: Option<StreamingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_attributes: Option<ExtendedAttributes>,
}

impl Device {
    /// Value of a feature flag in the extended attributes, `false` if absent.
    pub fn feature_enabled(&self, key: &str) -> bool {
        self.extended_attributes
            .as_ref()
            .and_then(|attrs| attrs.feature_enabled.get(key).copied())
            .unwrap_or(false)
    }
}

/// Request body of `DeviceService.GetAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStreamRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partial_eq_filter: Vec<Device>,
}
