//! Rendering of a finished verification run.
//!
//! [`render`] is pure: it maps an outcome and a summary mode to the text that
//! should be written to stdout, or `None` for quiet mode. Printing is left to
//! the caller.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize as _;
use serde::Serialize;

use crate::domain::{Phase, PhaseReport, SummaryMode, VerificationOutcome, human_duration};
use crate::output::Styles;

/// Machine-readable form of one run, emitted by the `json` and `yaml` modes.
#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub app: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDocument>,
    #[serde(skip_serializing_if = "Timestamps::is_empty")]
    pub timestamps: Timestamps,
    #[serde(skip_serializing_if = "Durations::is_empty")]
    pub durations: Durations,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    pub message: String,
}

/// Boundary timestamps, RFC 3339 in UTC.
#[derive(Debug, Default, Serialize)]
pub struct Timestamps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creating_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploading_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_end: Option<DateTime<Utc>>,
}

impl Timestamps {
    fn is_empty(&self) -> bool {
        self.run_start.is_none()
    }
}

impl From<&PhaseReport> for Timestamps {
    fn from(r: &PhaseReport) -> Self {
        Self {
            run_start: r.run_start,
            creating_start: r.creating_start,
            uploading_start: r.uploading_start,
            staging_start: r.staging_start,
            starting_start: r.starting_start,
            run_end: r.run_end,
        }
    }
}

/// Phase durations in seconds.
#[derive(Debug, Default, Serialize)]
pub struct Durations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<f64>,
}

impl Durations {
    fn is_empty(&self) -> bool {
        self.init.is_none()
    }
}

impl From<&PhaseReport> for Durations {
    fn from(r: &PhaseReport) -> Self {
        let secs = |phase| r.duration(phase).as_ref().map(Duration::as_secs_f64);
        Self {
            init: secs(Phase::Init),
            creating: secs(Phase::Creating),
            uploading: secs(Phase::Uploading),
            staging: secs(Phase::Staging),
            starting: secs(Phase::Starting),
            elapsed: r.elapsed().as_ref().map(Duration::as_secs_f64),
        }
    }
}

impl<'a> SummaryDocument<'a> {
    #[must_use]
    pub fn new(selector: &'a str, outcome: &'a VerificationOutcome) -> Self {
        let report = outcome.report().cloned().unwrap_or_default();
        Self {
            app: selector,
            name: outcome.app_name(),
            status: outcome.status(),
            reason: match outcome {
                VerificationOutcome::Skipped { reason } => Some(reason.to_string()),
                _ => None,
            },
            error: match outcome {
                VerificationOutcome::Failed { error, .. } => Some(ErrorDocument {
                    code: error.code(),
                    phase: error.phase(),
                    message: error_chain(error),
                }),
                _ => None,
            },
            timestamps: Timestamps::from(&report),
            durations: Durations::from(&report),
            warnings: outcome.warnings().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Error message followed by each of its causes, `: `-separated.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(out, ": {cause}");
        source = cause.source();
    }
    out
}

/// Render the outcome of pushing `selector`, shown to humans as `caption`.
///
/// `json` yields one compact object per line and `yaml` one `---` document,
/// so the runs of a batch stay separately parseable.
///
/// # Errors
///
/// Returns an error if structured serialization fails.
pub fn render(
    mode: SummaryMode,
    selector: &str,
    caption: &str,
    outcome: &VerificationOutcome,
    styles: &Styles,
) -> Result<Option<String>> {
    let text = match mode {
        SummaryMode::Quiet => return Ok(None),
        SummaryMode::Short => headline(caption, outcome, styles),
        SummaryMode::Json => serde_json::to_string(&SummaryDocument::new(selector, outcome))
            .context("JSON serialization failed")?,
        SummaryMode::Yaml => {
            let doc = serde_yaml::to_string(&SummaryDocument::new(selector, outcome))
                .context("YAML serialization failed")?;
            format!("---\n{}", doc.trim_end())
        }
        SummaryMode::Full => full(caption, outcome, styles),
    };
    Ok(Some(text))
}

/// One-line summary.
fn headline(caption: &str, outcome: &VerificationOutcome, styles: &Styles) -> String {
    let caption = caption.style(styles.bold);
    match outcome {
        VerificationOutcome::Success { report, .. } => {
            let elapsed = report.elapsed().map_or_else(|| "-".to_string(), human_duration);
            format!(
                "Successfully pushed {caption} sample app in {}.",
                elapsed.style(styles.duration)
            )
        }
        VerificationOutcome::Skipped { reason } => {
            format!("Skipping push of {caption} sample app, because {reason}.")
        }
        VerificationOutcome::Failed { error, .. } => match error.phase() {
            Some(phase) => format!(
                "{} to push {caption} sample app in the {} phase.",
                "Failed".style(styles.error),
                phase.label().style(styles.bold)
            ),
            None => format!(
                "{} to push {caption} sample app.",
                "Failed".style(styles.error)
            ),
        },
    }
}

/// Headline plus a boxed table of phase durations and warnings.
fn full(caption: &str, outcome: &VerificationOutcome, styles: &Styles) -> String {
    let title = headline(caption, outcome, styles);
    let Some(report) = outcome.report() else {
        return title;
    };

    let mut rows: Vec<(&str, String)> = Phase::ALL
        .iter()
        .map(|p| (p.label(), cell(report.duration(*p))))
        .collect();
    rows.push(("elapsed", cell(report.elapsed())));
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{} {title}", "╭─".style(styles.dim));
    if let Some(name) = outcome.app_name() {
        let _ = writeln!(
            out,
            "{}  {:>label_width$}  {name}",
            "│".style(styles.dim),
            "name"
        );
    }
    for (label, value) in &rows {
        let _ = writeln!(
            out,
            "{}  {:>label_width$}  {}",
            "│".style(styles.dim),
            label,
            value.style(styles.duration)
        );
    }
    for warning in outcome.warnings() {
        let _ = writeln!(
            out,
            "{}  {} {warning}",
            "│".style(styles.dim),
            "⚠".style(styles.warning)
        );
    }
    let _ = write!(out, "{}", "╰─".style(styles.dim));
    out
}

fn cell(duration: Option<Duration>) -> String {
    duration.map_or_else(|| "-".to_string(), human_duration)
}
