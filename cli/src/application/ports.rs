//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::{Bundle, GonutConfig};

// ── Value Types ───────────────────────────────────────────────────────────────

/// The application a backend call acts on.
#[derive(Debug, Clone, Copy)]
pub struct PushTarget<'a> {
    /// Generated, unique application name.
    pub name: &'a str,
    /// Buildpack the application is built with.
    pub buildpack: &'a str,
}

// ── Deployment Backend Ports ──────────────────────────────────────────────────

/// Platform capability queries.
#[allow(async_fn_in_trait)]
pub trait BuildpackInspector {
    /// Whether `buildpack` is currently installed on the platform.
    async fn has_buildpack(&self, buildpack: &str) -> Result<bool>;
}

/// Application lifecycle operations, one call per phase boundary.
#[allow(async_fn_in_trait)]
pub trait AppLifecycle {
    /// Create the application record.
    async fn create_app(&self, target: &PushTarget<'_>) -> Result<()>;
    /// Upload the application bits.
    async fn upload(&self, target: &PushTarget<'_>, bundle: &Bundle) -> Result<()>;
    /// Stage (build) the uploaded bits.
    async fn stage(&self, target: &PushTarget<'_>) -> Result<()>;
    /// Start the application and block until it runs or fails.
    async fn await_started(&self, target: &PushTarget<'_>) -> Result<()>;
    /// Delete the application and its routes.
    async fn delete_app(&self, name: &str) -> Result<()>;
}

/// Reachability check against a started application.
#[allow(async_fn_in_trait)]
pub trait AppProbe {
    /// Succeeds if the application answered a request.
    async fn probe(&self, name: &str) -> Result<()>;
}

/// Composite trait — any type implementing all three sub-traits is a `PushBackend`.
pub trait PushBackend: BuildpackInspector + AppLifecycle + AppProbe {}

/// Blanket implementation: any type implementing all three sub-traits is a `PushBackend`.
impl<T> PushBackend for T where T: BuildpackInspector + AppLifecycle + AppProbe {}

// ── Content Port ──────────────────────────────────────────────────────────────

/// Supplies the bundle of a sample application.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Fetch the bundle stored under `asset`.
    async fn fetch(&self, asset: &str) -> Result<Bundle>;
}

// ── Naming and Time Ports ─────────────────────────────────────────────────────

/// Produces unique application names.
pub trait NameGenerator {
    /// Return `prefix` followed by an opaque random token.
    fn generate(&self, prefix: &str) -> String;
}

/// Source of phase boundary timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading the optional gonut config file.
pub trait ConfigStore {
    /// Load the config file, returning defaults if it does not exist.
    fn load(&self) -> Result<GonutConfig>;
    /// Location of the config file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}
