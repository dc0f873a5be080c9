//! `get devices` / `get workspaces`.

use cvaas_core::{DeviceCriteria, DeviceRecord, WorkspaceRecord};
use tabled::Tabled;

use crate::cli::{DeviceFilterArgs, GetArgs, GetCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device ID")]
    device_id: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Streaming")]
    streaming: String,
    #[tabled(rename = "MLAG")]
    mlag: String,
    #[tabled(rename = "DANZ")]
    danz: String,
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_owned()
}

impl From<&DeviceRecord> for DeviceRow {
    fn from(d: &DeviceRecord) -> Self {
        Self {
            device_id: d.device_id.clone(),
            hostname: d.hostname.clone(),
            model: d.model.clone(),
            version: d.software_version.clone(),
            mac: d.system_mac.clone(),
            streaming: d.streaming_status.clone(),
            mlag: yes_no(d.mlag_enabled),
            danz: yes_no(d.danz_enabled),
        }
    }
}

#[derive(Tabled)]
struct WorkspaceRow {
    #[tabled(rename = "Workspace ID")]
    workspace_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&WorkspaceRecord> for WorkspaceRow {
    fn from(w: &WorkspaceRecord) -> Self {
        Self {
            workspace_id: w.workspace_id.clone(),
            name: w.display_name.clone(),
            state: w.state.clone(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

impl From<DeviceFilterArgs> for DeviceCriteria {
    fn from(args: DeviceFilterArgs) -> Self {
        Self {
            model: args.model,
            mlag: args.mlag,
            danz: args.danz,
        }
    }
}

pub async fn handle(args: GetArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        GetCommand::Devices(filter) => {
            let criteria = DeviceCriteria::from(filter);
            // Reject conflicting flags before touching credentials.
            criteria.to_request()?;

            let (session, _cancel) = ctx.connect()?;
            let devices = session.list_devices(&criteria).await?;

            let out = output::render_list(
                ctx.settings.output,
                &devices,
                |x| DeviceRow::from(x),
                |d| d.device_id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }

        GetCommand::Workspaces(ws) => {
            cvaas_core::build_workspace_filter(Some(&ws.state))?;

            let (session, _cancel) = ctx.connect()?;
            let workspaces = session.list_workspaces(Some(&ws.state)).await?;

            let out = output::render_list(
                ctx.settings.output,
                &workspaces,
                |x| WorkspaceRow::from(x),
                |w| w.workspace_id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }
    }
}
