//! `assign tag`.

use cvaas_core::Tag;

use crate::cli::{AssignArgs, AssignCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: AssignArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        AssignCommand::Tag(args) => {
            let tag = Tag {
                workspace_id: args.workspace,
                label: args.label,
                value: args.value,
                element_type: args.element_type,
                element_subtype: args.element_subtype,
            };

            let (session, _cancel) = ctx.connect()?;
            let ack = session.assign_tag(&tag, &args.device).await?;

            let out = output::render_single(ctx.settings.output, &ack, ToString::to_string)?;
            ctx.print(&out);
            ctx.status(&format!(
                "Tag {}={} assigned to {}",
                tag.label, tag.value, args.device
            ));
            Ok(())
        }
    }
}
