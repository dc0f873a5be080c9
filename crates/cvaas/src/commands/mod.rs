//! Command handlers and dispatch.
//!
//! Handlers gather their inputs (prompting where allowed) before opening the
//! session, so the session deadline only covers network work.

pub mod assign;
pub mod create;
pub mod get;
pub mod ledger;
pub mod run;
pub mod util;

use clap::CommandFactory;
use cvaas_api::{GatewayClient, TlsMode, TransportConfig};
use cvaas_core::{CancelHandle, Session, SessionOptions};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Everything a handler needs besides its own arguments.
pub struct Context<'a> {
    pub global: &'a GlobalOpts,
    pub settings: &'a Settings,
    pub color: bool,
}

impl Context<'_> {
    /// Load credentials and open a session with the resolved settings.
    pub fn connect(&self) -> Result<(Session<GatewayClient>, CancelHandle), CliError> {
        let token = self
            .global
            .token
            .as_deref()
            .ok_or(CliError::MissingCredentialFile {
                flag: "token",
                env: "CVAAS_TOKEN_FILE",
            })?;
        let url = self
            .global
            .url
            .as_deref()
            .ok_or(CliError::MissingCredentialFile {
                flag: "url",
                env: "CVAAS_URL_FILE",
            })?;

        let options = SessionOptions {
            timeout: self.settings.timeout,
            transport: TransportConfig {
                tls: self
                    .settings
                    .ca_cert
                    .clone()
                    .map_or(TlsMode::System, TlsMode::CustomCa),
                ..TransportConfig::default()
            },
        };

        Ok(cvaas_core::connect(token, url, &options)?)
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.settings.quiet);
    }

    pub fn status(&self, message: &str) {
        output::status(message, self.color, self.settings.quiet);
    }
}

/// Route a command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Get(args) => get::handle(args, ctx).await,
        Command::Create(args) => create::handle(args, ctx).await,
        Command::Assign(args) => assign::handle(args, ctx).await,
        Command::Run(args) => run::handle(args, ctx).await,
        Command::Ledger(args) => ledger::handle(&args, ctx),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "cvaas", &mut std::io::stdout());
            Ok(())
        }
    }
}
