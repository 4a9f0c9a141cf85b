//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;
use crate::domain::{Catalog, ConfigError, PushError, SummaryMode};
use crate::infra::config::YamlConfigStore;
use crate::output::{OutputContext, json};

/// Push sample apps to Cloud Foundry and time every phase
#[derive(Parser)]
#[command(
    name = "gonut",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Push a sample app and report how long each phase took
    Push(commands::push::PushArgs),

    /// List the sample apps that can be pushed
    List,

    /// Show version
    Version,
}

/// Error already rendered as a JSON object; printed verbatim by `main`.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RenderedError(pub String);

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or a push failed.
    pub async fn run(self) -> Result<()> {
        let Cli { no_color, command } = self;
        match command {
            Command::Version => {
                commands::version::run();
                Ok(())
            }
            Command::List => {
                let ctx = OutputContext::new(no_color, false);
                commands::list::run(&ctx, &Catalog::builtin()?);
                Ok(())
            }
            Command::Push(args) => {
                let requested_json = args.summary == Some(SummaryMode::Json);
                let store = YamlConfigStore::default();
                let app = match AppContext::new(no_color, args.overrides(), &store) {
                    Ok(app) => app,
                    Err(e) if requested_json => return Err(as_json(&e)),
                    Err(e) => return Err(e),
                };
                match commands::push::run(&args, &app).await {
                    Err(e) if app.settings.summary == SummaryMode::Json => Err(as_json(&e)),
                    other => other,
                }
            }
        }
    }
}

fn as_json(err: &anyhow::Error) -> anyhow::Error {
    let code = match (err.downcast_ref::<PushError>(), err.downcast_ref::<ConfigError>()) {
        (Some(push), _) => push.code(),
        (None, Some(_)) => "CONFIG_ERROR",
        (None, None) => "ERROR",
    };
    match json::format_error(&format!("{err:#}"), code) {
        Ok(rendered) => RenderedError(rendered).into(),
        Err(e) => e,
    }
}
