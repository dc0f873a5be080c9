//! `ledger list`.

use tabled::Tabled;

use crate::cli::{LedgerArgs, LedgerCommand};
use crate::commands::Context;
use crate::error::CliError;
use crate::ledger::{Ledger, LedgerEntry};
use crate::output;

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Workspace ID")]
    workspace_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Request ID")]
    request_id: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&LedgerEntry> for LedgerRow {
    fn from(e: &LedgerEntry) -> Self {
        Self {
            workspace_id: e.workspace_id.clone(),
            name: e.workspace_name.clone(),
            request_id: e.request_id.clone(),
            created_at: e.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

pub fn handle(args: &LedgerArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        LedgerCommand::List => {
            let ledger = Ledger::load(&ctx.settings.ledger)?;
            let out = output::render_list(
                ctx.settings.output,
                &ledger.workspaces,
                |x| LedgerRow::from(x),
                |e| e.workspace_id.clone(),
            )?;
            ctx.print(&out);
            Ok(())
        }
    }
}
