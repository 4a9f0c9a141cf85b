//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod bundle;
pub mod catalog;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod outcome;
pub mod report;

pub use bundle::{Bundle, BundleFile};
pub use catalog::{ALL_SELECTOR, Catalog, SampleApp};
pub use cleanup::CleanupDecision;
pub use config::{GonutConfig, PushSettings, SettingOverrides, SummaryMode};
pub use error::{CatalogError, ConfigError, PushError, RunWarning};
pub use outcome::{SkipReason, VerificationOutcome};
pub use report::{Boundary, Phase, PhaseReport, human_duration};
