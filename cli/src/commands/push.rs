//! `gonut push` — push one sample app, or every app with `all`.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::batch::{RunRecord, run_batch};
use crate::application::services::push::PushServices;
use crate::domain::{
    ALL_SELECTOR, CleanupDecision, SampleApp, SettingOverrides, SummaryMode, VerificationOutcome,
};
use crate::infra::assets::EmbeddedSampleApps;
use crate::infra::clock::SystemClock;
use crate::infra::naming::RandomNameGenerator;
use crate::output::render;

/// Arguments for the push command.
#[derive(Args, Debug, Default)]
pub struct PushArgs {
    /// Sample app to push (see `gonut list`), or `all`
    pub app: String,

    /// When to delete the pushed app: always, never, on-success
    #[arg(short, long, env = "GONUT_DELETE", value_name = "POLICY")]
    pub delete: Option<CleanupDecision>,

    /// Summary after each push: quiet, short, json, yaml, full
    #[arg(short, long, env = "GONUT_SUMMARY", value_name = "MODE")]
    pub summary: Option<SummaryMode>,

    /// Do not probe the app's route after it started
    #[arg(
        short = 'p',
        long,
        env = "GONUT_NO_PING",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_ping: bool,
}

impl PushArgs {
    /// Settings given on the command line or through the environment.
    #[must_use]
    pub fn overrides(&self) -> SettingOverrides {
        SettingOverrides {
            cleanup: self.delete,
            summary: self.summary,
            no_ping: self.no_ping,
        }
    }
}

/// Resolve the apps a selector refers to, in catalog order.
///
/// # Errors
///
/// Returns an error if `selector` is neither `all` nor a known app.
pub fn select<'a>(app: &'a AppContext, selector: &str) -> Result<Vec<&'a SampleApp>> {
    if selector == ALL_SELECTOR {
        return Ok(app.catalog.iter().collect());
    }
    Ok(vec![app.catalog.resolve(selector)?])
}

/// Run `gonut push`.
///
/// # Errors
///
/// Returns an error if the selector is unknown or a push failed. Skipped
/// pushes and probe or cleanup warnings are not errors.
pub async fn run(args: &PushArgs, app: &AppContext) -> Result<()> {
    let apps = select(app, &args.app)?;
    let reporter = app.terminal_reporter();
    let services = PushServices {
        backend: &app.backend,
        content: &EmbeddedSampleApps,
        names: &RandomNameGenerator,
        clock: &SystemClock,
        reporter: &reporter,
    };

    let mode = app.settings.summary;
    let mut printed: Result<()> = Ok(());
    let mut summary = run_batch(&services, apps, &app.settings, |record| {
        if printed.is_ok() {
            printed = render(
                mode,
                record.app.selector,
                record.app.caption,
                &record.outcome,
                &app.output.styles,
            )
            .map(|text| {
                if let Some(text) = text {
                    reporter.print(&text);
                }
            });
        }
    })
    .await;
    reporter.clear();
    printed.context("rendering summary")?;

    let (pushed, skipped) = (summary.succeeded(), summary.skipped());
    if let Some(RunRecord {
        app: failed,
        outcome: VerificationOutcome::Failed { error, .. },
    }) = summary.runs.pop()
    {
        return Err(anyhow::Error::new(error)
            .context(format!("push of the {} sample app failed", failed.caption)));
    }

    if args.app == ALL_SELECTOR {
        app.output.info(&format!("{pushed} pushed, {skipped} skipped"));
    }
    Ok(())
}
