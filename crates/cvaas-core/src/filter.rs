// ── Stream filter construction ──
//
// Criteria from the command line become `partialEqFilter` entries. A single
// filter object is the AND of its set fields; no object means "fetch all".

use std::collections::BTreeMap;
use std::str::FromStr;

use cvaas_api::resources::inventory::{
    Device, DeviceStreamRequest, ExtendedAttributes, filter_feature,
};
use cvaas_api::resources::workspace::{Workspace, WorkspaceState, WorkspaceStreamRequest};

use crate::error::CoreError;

/// Placeholder accepted in place of a workspace state to mean "any state".
const NO_STATE: &str = "NONE";

/// A device feature that can be required by the inventory filter.
///
/// The service cannot combine feature predicates, so at most one is ever
/// selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Mlag,
    Danz,
}

impl Feature {
    /// Resolve the `--mlag` / `--danz` flags into a single selection.
    pub fn from_flags(mlag: bool, danz: bool) -> Result<Option<Self>, CoreError> {
        match (mlag, danz) {
            (true, true) => Err(CoreError::ConflictingFilter {
                first: filter_feature::MLAG,
                second: filter_feature::DANZ,
            }),
            (true, false) => Ok(Some(Self::Mlag)),
            (false, true) => Ok(Some(Self::Danz)),
            (false, false) => Ok(None),
        }
    }

    /// Key of the feature in a filter's `featureEnabled` map.
    pub fn filter_key(self) -> &'static str {
        match self {
            Self::Mlag => filter_feature::MLAG,
            Self::Danz => filter_feature::DANZ,
        }
    }
}

/// Device selection as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCriteria {
    pub model: Option<String>,
    pub mlag: bool,
    pub danz: bool,
}

impl DeviceCriteria {
    /// Validate the criteria and build the stream request.
    pub fn to_request(&self) -> Result<DeviceStreamRequest, CoreError> {
        let feature = Feature::from_flags(self.mlag, self.danz)?;
        Ok(build_device_filter(self.model.as_deref(), feature))
    }
}

/// Build the inventory stream request.
///
/// An empty model name is treated as absent.
pub fn build_device_filter(model: Option<&str>, feature: Option<Feature>) -> DeviceStreamRequest {
    let model = model.filter(|m| !m.is_empty());
    if model.is_none() && feature.is_none() {
        return DeviceStreamRequest::default();
    }

    let filter = Device {
        model_name: model.map(str::to_owned),
        extended_attributes: feature.map(|f| ExtendedAttributes {
            feature_enabled: BTreeMap::from([(f.filter_key().to_owned(), true)]),
        }),
        ..Device::default()
    };

    DeviceStreamRequest {
        partial_eq_filter: vec![filter],
    }
}

/// Build the workspace stream request from a state name.
///
/// Blank input and `NONE` (any case) select every workspace. Other names are
/// matched case-insensitively against the known states; the filter carries
/// the numeric state code.
pub fn build_workspace_filter(state: Option<&str>) -> Result<WorkspaceStreamRequest, CoreError> {
    let Some(name) = state.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(WorkspaceStreamRequest::default());
    };

    let upper = name.to_uppercase();
    if upper == NO_STATE {
        return Ok(WorkspaceStreamRequest::default());
    }

    let state = WorkspaceState::from_str(&upper).map_err(|_| CoreError::InvalidFilterValue {
        field: "state",
        value: name.to_owned(),
    })?;

    Ok(WorkspaceStreamRequest {
        partial_eq_filter: vec![Workspace {
            state: Some(state),
            ..Workspace::default()
        }],
    })
}
