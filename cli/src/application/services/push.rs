//! Application service — push verification use-case.
//!
//! Drives one sample app through capability check, name generation, content
//! retrieval, the four deployment phases, the optional reachability probe and
//! the cleanup decision. Imports only from `crate::domain` and
//! `crate::application::ports`; all I/O is routed through injected port traits.

use std::future::Future;

use anyhow::Result;

use crate::application::ports::{
    Clock, ContentSource, NameGenerator, ProgressReporter, PushBackend, PushTarget,
};
use crate::domain::{
    Boundary, Phase, PhaseReport, PushError, PushSettings, RunWarning, SampleApp, SkipReason,
    VerificationOutcome,
};

/// Collaborators of a verification run, shared by every run of a batch.
pub struct PushServices<'a, B, S, N, K, R> {
    pub backend: &'a B,
    pub content: &'a S,
    pub names: &'a N,
    pub clock: &'a K,
    pub reporter: &'a R,
}

impl<B, S, N, K, R> PushServices<'_, B, S, N, K, R>
where
    B: PushBackend,
    S: ContentSource,
    N: NameGenerator,
    K: Clock,
    R: ProgressReporter,
{
    /// Run one end-to-end verification of `app`.
    ///
    /// Never returns an error: every failure is folded into the outcome so
    /// that the partial report survives for diagnostics.
    pub async fn push(&self, app: &SampleApp, settings: &PushSettings) -> VerificationOutcome {
        let available = match self.backend.has_buildpack(app.buildpack).await {
            Ok(available) => available,
            Err(source) => {
                return VerificationOutcome::Failed {
                    app_name: None,
                    error: PushError::CapabilityCheckFailed {
                        buildpack: app.buildpack.to_string(),
                        source,
                    },
                    report: PhaseReport::default(),
                    warnings: Vec::new(),
                };
            }
        };

        if !available {
            tracing::info!(app = app.selector, buildpack = app.buildpack, "buildpack missing, skipping");
            return VerificationOutcome::Skipped {
                reason: SkipReason::BuildpackUnavailable {
                    buildpack: app.buildpack.to_string(),
                },
            };
        }

        let app_name = self.names.generate(app.app_name_prefix);

        let bundle = match self.content.fetch(app.asset).await {
            Ok(bundle) => bundle,
            Err(source) => {
                return VerificationOutcome::Failed {
                    app_name: Some(app_name),
                    error: PushError::ContentFetchFailed {
                        app: app.selector.to_string(),
                        source,
                    },
                    report: PhaseReport::default(),
                    warnings: Vec::new(),
                };
            }
        };

        let target = PushTarget {
            name: &app_name,
            buildpack: app.buildpack,
        };

        let mut report = PhaseReport::default();
        let result = self.deploy(&target, &bundle, &mut report).await;
        let mut warnings = Vec::new();

        if result.is_ok() && !settings.no_ping {
            self.reporter.step(&format!("Probing {app_name}..."));
            match self.backend.probe(&app_name).await {
                Ok(()) => self.reporter.success(&format!("{app_name} is reachable")),
                Err(e) => warnings.push(RunWarning::ProbeFailed {
                    app_name: app_name.clone(),
                    reason: format!("{e:#}"),
                }),
            }
        }

        if settings.cleanup.should_delete(result.is_ok()) {
            self.reporter.step(&format!("Deleting {app_name}..."));
            match self.backend.delete_app(&app_name).await {
                Ok(()) => self.reporter.success(&format!("Deleted {app_name}")),
                Err(e) => warnings.push(RunWarning::CleanupFailed {
                    app_name: app_name.clone(),
                    reason: format!("{e:#}"),
                }),
            }
        }

        for warning in &warnings {
            tracing::debug!(app = app.selector, "{warning}");
            self.reporter.warn(&warning.to_string());
        }

        match result {
            Ok(()) => {
                tracing::info!(app = app.selector, name = %app_name, "push succeeded");
                VerificationOutcome::Success {
                    app_name,
                    report,
                    warnings,
                }
            }
            Err(error) => {
                tracing::info!(app = app.selector, name = %app_name, "push failed: {error}");
                VerificationOutcome::Failed {
                    app_name: Some(app_name),
                    error,
                    report,
                    warnings,
                }
            }
        }
    }

    /// Stamp `report` while walking the four backend phases. Stops at the
    /// first failing call, leaving its end boundary and all later ones unset.
    async fn deploy(
        &self,
        target: &PushTarget<'_>,
        bundle: &crate::domain::Bundle,
        report: &mut PhaseReport,
    ) -> Result<(), PushError> {
        report.stamp(Boundary::RunStart, self.clock.now());

        self.reporter.step(&format!("Creating app {}...", target.name));
        report.stamp(Boundary::CreatingStart, self.clock.now());
        self.finish(report, Phase::Creating, self.backend.create_app(target))
            .await?;

        self.reporter.step(&format!("Uploading {} bytes...", bundle.size()));
        self.finish(report, Phase::Uploading, self.backend.upload(target, bundle))
            .await?;

        self.reporter.step(&format!("Staging with {}...", target.buildpack));
        self.finish(report, Phase::Staging, self.backend.stage(target))
            .await?;

        self.reporter.step(&format!("Starting {}...", target.name));
        self.finish(report, Phase::Starting, self.backend.await_started(target))
            .await
    }

    async fn finish(
        &self,
        report: &mut PhaseReport,
        phase: Phase,
        call: impl Future<Output = Result<()>>,
    ) -> Result<(), PushError> {
        call.await
            .map_err(|source| PushError::BackendCallFailed { phase, source })?;
        let at = self.clock.now();
        tracing::debug!(%phase, %at, "phase finished");
        report.stamp(phase.end(), at);
        Ok(())
    }
}
