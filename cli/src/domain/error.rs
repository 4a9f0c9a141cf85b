//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::report::Phase;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while resolving push settings. Always raised before any
/// backend call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported delete setting: {value}\n\nValid settings: never, always, on-success")]
    UnknownCleanupPolicy { value: String },

    #[error("Unsupported summary setting: {value}\n\nValid settings: quiet, short, json, yaml, full")]
    UnknownSummaryMode { value: String },

    #[error("Unknown sample app: {name}\n\nValid sample apps: {valid}")]
    UnknownDescriptor { name: String, valid: String },
}

// ── Catalog errors ────────────────────────────────────────────────────────────

/// Violations of the catalog construction invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Sample app selector '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateIdentifier {
        name: String,
        first: String,
        second: String,
    },

    #[error("'{0}' is reserved and cannot be used as a sample app selector")]
    ReservedIdentifier(String),
}

// ── Push errors ───────────────────────────────────────────────────────────────

/// Terminal failure of a single verification run.
///
/// The `source` of each variant is the backend's own error chain, kept as
/// `anyhow::Error` so the CLI can print every context layer.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("could not check whether {buildpack} is installed")]
    CapabilityCheckFailed {
        buildpack: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not load the {app} sample app bundle")]
    ContentFetchFailed {
        app: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{phase} phase failed")]
    BackendCallFailed {
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },
}

impl PushError {
    /// Phase the run was in when it failed, if it reached the deployment stage.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::BackendCallFailed { phase, .. } => Some(*phase),
            Self::CapabilityCheckFailed { .. } | Self::ContentFetchFailed { .. } => None,
        }
    }

    /// Stable machine-readable code used by JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CapabilityCheckFailed { .. } => "CAPABILITY_CHECK_FAILED",
            Self::ContentFetchFailed { .. } => "CONTENT_FETCH_FAILED",
            Self::BackendCallFailed { .. } => "BACKEND_CALL_FAILED",
        }
    }
}

// ── Warnings ──────────────────────────────────────────────────────────────────

/// Non-fatal signals attached to an outcome. They never change whether a
/// run is classified as a success or a failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunWarning {
    #[error("application {app_name} did not answer the reachability probe: {reason}")]
    ProbeFailed { app_name: String, reason: String },

    #[error("application {app_name} could not be deleted: {reason}")]
    CleanupFailed { app_name: String, reason: String },
}
