//! Application context — resolved state handed to the `push` handler.
//!
//! `AppContext` gathers what every verification run of one invocation
//! shares: terminal output, the resolved `PushSettings`, the catalog and the
//! Cloud Foundry backend. Building it resolves configuration, so an invalid
//! setting fails here before any backend call.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::infra::command_runner::TokioCommandRunner;
use crate::domain::{Catalog, PushSettings, SettingOverrides, SummaryMode};
use crate::infra::cf::CfCli;
use crate::output::{OutputContext, TerminalReporter};

/// Unified context for a `gonut push` invocation.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Settings after layering flags, environment and config file.
    pub settings: PushSettings,
    /// Sample apps that can be pushed.
    pub catalog: Catalog,
    /// Cloud Foundry CLI backend.
    pub backend: CfCli<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or holds an
    /// unsupported value, or if the built-in catalog is inconsistent.
    pub fn new(
        no_color: bool,
        overrides: SettingOverrides,
        store: &impl ConfigStore,
    ) -> Result<Self> {
        let file = store.load().context("loading config")?;
        let settings = PushSettings::resolve(&file, overrides).context("resolving settings")?;
        tracing::debug!(?settings, "resolved push settings");

        // Structured summaries own stdout.
        let quiet = settings.summary == SummaryMode::Quiet || settings.summary.is_structured();

        Ok(Self {
            output: OutputContext::new(no_color, quiet),
            settings,
            catalog: Catalog::builtin()?,
            backend: CfCli::default_runner(),
        })
    }

    /// Returns a `TerminalReporter` wrapping this context's output.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
