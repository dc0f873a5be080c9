//! `run process`: workspace, tag and bulk assignment in one session.

use chrono::Utc;
use cvaas_core::{Ack, DeviceCriteria, Tag};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{ProcessArgs, RunArgs, RunCommand};
use crate::commands::Context;
use crate::commands::util::value_or_prompt;
use crate::error::CliError;
use crate::ledger::{Ledger, LedgerEntry};
use crate::output;

/// One tag assignment and the service's reply to it.
#[derive(Debug, Serialize)]
struct Assignment {
    device_id: String,
    ack: Ack,
}

/// What a process run did, in order, with every acknowledgement.
#[derive(Debug, Serialize)]
struct ProcessReport {
    workspace_id: String,
    request_id: String,
    workspace_ack: Ack,
    tag: Tag,
    tag_ack: Ack,
    assignments: Vec<Assignment>,
}

impl ProcessReport {
    fn summary(&self) -> String {
        let mut lines = vec![
            format!("Workspace:  {}", self.workspace_id),
            format!("Request:    {}", self.request_id),
            self.workspace_ack.to_string(),
            format!("Tag:        {}={}", self.tag.label, self.tag.value),
            self.tag_ack.to_string(),
            format!("Assigned:   {} device(s)", self.assignments.len()),
        ];
        for assignment in &self.assignments {
            lines.push(format!("  - {}", assignment.device_id));
            lines.push(assignment.ack.to_string());
        }
        lines.join("\n")
    }
}

pub async fn handle(args: RunArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        RunCommand::Process(args) => process(args, ctx).await,
    }
}

async fn process(args: ProcessArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let criteria = DeviceCriteria::from(args.filter);
    criteria.to_request()?;

    let workspace_id = value_or_prompt(args.workspace, "workspace", "Workspace ID")?;
    let name = value_or_prompt(args.name, "name", "Workspace name")?;
    let tag = Tag {
        workspace_id: workspace_id.clone(),
        label: value_or_prompt(args.label, "label", "Tag label")?,
        value: value_or_prompt(args.value, "value", "Tag value")?,
        element_type: args.element_type,
        element_subtype: args.element_subtype,
    };
    let request_id = cvaas_core::request_id();

    let (session, _cancel) = ctx.connect()?;

    let workspace_ack = session
        .create_workspace(&workspace_id, &request_id, &name)
        .await?;
    Ledger::record(
        &ctx.settings.ledger,
        LedgerEntry {
            workspace_id: workspace_id.clone(),
            request_id: request_id.clone(),
            workspace_name: name,
            created_at: Utc::now(),
        },
    )?;
    ctx.status(&format!("Workspace '{workspace_id}' created"));

    let tag_ack = session.create_tag(&tag).await?;
    ctx.status(&format!("Tag {}={} created", tag.label, tag.value));

    let devices = session.list_devices(&criteria).await?;
    let mut assignments = Vec::new();
    for device in devices.iter().filter(|d| d.model == args.match_model) {
        debug!(device = %device.device_id, "assigning tag");
        let ack = session.assign_tag(&tag, &device.device_id).await?;
        assignments.push(Assignment {
            device_id: device.device_id.clone(),
            ack,
        });
    }
    info!(
        matched = assignments.len(),
        listed = devices.len(),
        model = %args.match_model,
        "process complete"
    );

    let report = ProcessReport {
        workspace_id,
        request_id,
        workspace_ack,
        tag,
        tag_ack,
        assignments,
    };
    let out = output::render_single(ctx.settings.output, &report, ProcessReport::summary)?;
    ctx.print(&out);
    Ok(())
}
