//! `create workspace` / `create tag`.

use chrono::Utc;
use cvaas_core::Tag;

use crate::cli::{CreateArgs, CreateCommand, CreateTagArgs, CreateWorkspaceArgs};
use crate::commands::Context;
use crate::commands::util::{number_or_prompt, value_or_prompt};
use crate::error::CliError;
use crate::ledger::{Ledger, LedgerEntry};
use crate::output;

pub async fn handle(args: CreateArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        CreateCommand::Workspace(args) => create_workspace(args, ctx).await,
        CreateCommand::Tag(args) => create_tag(args, ctx).await,
    }
}

async fn create_workspace(args: CreateWorkspaceArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let workspace_id = value_or_prompt(args.id, "id", "Workspace ID")?;
    let name = value_or_prompt(args.name, "name", "Workspace name")?;
    let request_id = cvaas_core::request_id();

    let (session, _cancel) = ctx.connect()?;
    let ack = session
        .create_workspace(&workspace_id, &request_id, &name)
        .await?;

    Ledger::record(
        &ctx.settings.ledger,
        LedgerEntry {
            workspace_id: workspace_id.clone(),
            request_id,
            workspace_name: name,
            created_at: Utc::now(),
        },
    )?;

    let out = output::render_single(ctx.settings.output, &ack, ToString::to_string)?;
    ctx.print(&out);
    ctx.status(&format!("Workspace '{workspace_id}' created"));
    Ok(())
}

/// Collect a tag from flags, prompting for what is missing.
fn tag_from(args: CreateTagArgs) -> Result<Tag, CliError> {
    Ok(Tag {
        workspace_id: value_or_prompt(args.workspace, "workspace", "Workspace ID")?,
        label: value_or_prompt(args.label, "label", "Tag label")?,
        value: value_or_prompt(args.value, "value", "Tag value")?,
        element_type: number_or_prompt(args.element_type, "element-type", "Element type", 1)?,
        element_subtype: number_or_prompt(
            args.element_subtype,
            "element-subtype",
            "Element subtype",
            1,
        )?,
    })
}

async fn create_tag(args: CreateTagArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let tag = tag_from(args)?;

    let (session, _cancel) = ctx.connect()?;
    let ack = session.create_tag(&tag).await?;

    let out = output::render_single(ctx.settings.output, &ack, ToString::to_string)?;
    ctx.print(&out);
    ctx.status(&format!(
        "Tag {}={} created in workspace '{}'",
        tag.label, tag.value, tag.workspace_id
    ));
    Ok(())
}
