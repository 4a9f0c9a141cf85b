//! Result of one verification run.

use crate::domain::error::{PushError, RunWarning};
use crate::domain::report::{Phase, PhaseReport};

/// Why a run was skipped without touching the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The buildpack the sample app needs is not installed.
    BuildpackUnavailable { buildpack: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuildpackUnavailable { buildpack } => {
                write!(f, "there is no {buildpack} installed")
            }
        }
    }
}

/// Outcome of a run. Probe and cleanup problems ride along as warnings and
/// never move a run between variants.
#[derive(Debug)]
pub enum VerificationOutcome {
    Success {
        app_name: String,
        report: PhaseReport,
        warnings: Vec<RunWarning>,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        /// `None` when the run failed before a name was generated.
        app_name: Option<String>,
        error: PushError,
        /// Timestamps collected up to the failure.
        report: PhaseReport,
        warnings: Vec<RunWarning>,
    },
}

impl VerificationOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Report of the run. Skipped runs have an empty report.
    #[must_use]
    pub fn report(&self) -> Option<&PhaseReport> {
        match self {
            Self::Success { report, .. } | Self::Failed { report, .. } => Some(report),
            Self::Skipped { .. } => None,
        }
    }

    #[must_use]
    pub fn app_name(&self) -> Option<&str> {
        match self {
            Self::Success { app_name, .. } => Some(app_name),
            Self::Failed { app_name, .. } => app_name.as_deref(),
            Self::Skipped { .. } => None,
        }
    }

    #[must_use]
    pub fn warnings(&self) -> &[RunWarning] {
        match self {
            Self::Success { warnings, .. } | Self::Failed { warnings, .. } => warnings,
            Self::Skipped { .. } => &[],
        }
    }

    /// Phase a failed run broke in, if it got that far.
    #[must_use]
    pub fn failed_phase(&self) -> Option<Phase> {
        match self {
            Self::Failed { error, .. } => error.phase(),
            Self::Success { .. } | Self::Skipped { .. } => None,
        }
    }

    /// Lower-case status label used by structured output.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}
