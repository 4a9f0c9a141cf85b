//! Tests for the push verification use-case.
//!
//! Every backend interaction goes through the recording mocks in
//! `helpers`, so these run without a platform.

#![allow(clippy::expect_used)]

use std::time::Duration;

use gonut_cli::domain::{
    Boundary, CleanupDecision, Phase, PhaseReport, PushError, PushSettings, RunWarning, SkipReason,
    SummaryMode, VerificationOutcome,
};

use crate::helpers::{FailingContent, GOLANG, Harness, RecordingBackend, t0};

fn settings(cleanup: CleanupDecision) -> PushSettings {
    PushSettings {
        cleanup,
        summary: SummaryMode::Short,
        no_ping: false,
    }
}

const NAME: &str = "gonut-golang-app-fixed";

// ── Success ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_success_runs_every_phase_and_deletes_once() {
    let h = Harness::new(RecordingBackend::new());

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::OnSuccess))
        .await;

    let VerificationOutcome::Success {
        app_name,
        report,
        warnings,
    } = &outcome
    else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(app_name, NAME);
    assert!(warnings.is_empty());
    assert!(report.is_complete());
    assert!(report.is_ordered());
    assert_eq!(report.run_start, Some(t0()));
    assert_eq!(report.elapsed(), Some(Duration::from_secs(5)));
    assert_eq!(
        h.backend.calls(),
        vec![
            "has_buildpack:go_buildpack".to_string(),
            format!("create:{NAME}"),
            format!("upload:{NAME}"),
            format!("stage:{NAME}"),
            format!("start:{NAME}"),
            format!("probe:{NAME}"),
            format!("delete:{NAME}"),
        ]
    );
}

#[tokio::test]
async fn test_success_reads_clock_once_per_boundary() {
    let h = Harness::new(RecordingBackend::new());
    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Never))
        .await;

    assert!(outcome.is_success());
    assert_eq!(h.clock.readings(), 6);
    let report = outcome.report().expect("report");
    for phase in Phase::ALL {
        assert_eq!(report.duration(phase), Some(Duration::from_secs(1)), "{phase}");
    }
}

#[tokio::test]
async fn test_generated_name_uses_app_prefix() {
    let h = Harness::new(RecordingBackend::new());
    h.services()
        .push(&GOLANG, &settings(CleanupDecision::Never))
        .await;
    let creates = h.backend.calls_to("create");
    assert_eq!(creates.len(), 1);
    assert!(creates[0].starts_with("create:gonut-golang-app-"));
}

// ── Skip ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_buildpack_skips_without_side_effects() {
    let h = Harness::new(RecordingBackend::new().without_buildpack("go_buildpack"));

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    assert!(matches!(
        &outcome,
        VerificationOutcome::Skipped {
            reason: SkipReason::BuildpackUnavailable { buildpack }
        } if buildpack == "go_buildpack"
    ));
    assert_eq!(h.backend.calls(), vec!["has_buildpack:go_buildpack"]);
    assert_eq!(h.clock.readings(), 0);
}

#[tokio::test]
async fn test_capability_check_error_fails_without_name() {
    let h = Harness::new(RecordingBackend::new().failing_capability());

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    let VerificationOutcome::Failed { app_name, error, report, .. } = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(app_name.is_none());
    assert!(matches!(error, PushError::CapabilityCheckFailed { .. }));
    assert_eq!(report.run_start, None);
    assert_eq!(h.backend.calls().len(), 1);
}

// ── Failure ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_failure_with_always_still_deletes() {
    let h = Harness::new(RecordingBackend::new().failing_at(Phase::Starting));

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    assert!(outcome.is_failed());
    assert_eq!(outcome.failed_phase(), Some(Phase::Starting));
    let report = outcome.report().expect("report");
    assert!(report.starting_start.is_some());
    assert_eq!(report.run_end, None);
    assert_eq!(report.elapsed(), None);
    assert_eq!(report.duration(Phase::Starting), None);
    assert_eq!(h.backend.calls_to("delete"), vec![format!("delete:{NAME}")]);
    assert!(h.backend.calls_to("probe").is_empty());
}

#[tokio::test]
async fn test_failed_phase_leaves_only_a_prefix_stamped() {
    for phase in [
        Phase::Creating,
        Phase::Uploading,
        Phase::Staging,
        Phase::Starting,
    ] {
        let h = Harness::new(RecordingBackend::new().failing_at(phase));
        let outcome = h
            .services()
            .push(&GOLANG, &settings(CleanupDecision::Never))
            .await;

        assert_eq!(outcome.failed_phase(), Some(phase));
        let report = outcome.report().expect("report");
        assert!(report.is_ordered(), "{phase}: {report:?}");
        let first_unset = Boundary::ALL
            .iter()
            .position(|b| *b == phase.end())
            .expect("end boundary");
        for (i, boundary) in Boundary::ALL.iter().enumerate() {
            assert_eq!(
                report.at(*boundary).is_some(),
                i < first_unset,
                "{phase}: {boundary:?}"
            );
        }
    }
}

#[tokio::test]
async fn test_on_success_keeps_failed_app() {
    let h = Harness::new(RecordingBackend::new().failing_at(Phase::Staging));
    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::OnSuccess))
        .await;

    assert!(outcome.is_failed());
    assert!(h.backend.calls_to("delete").is_empty());
}

#[tokio::test]
async fn test_backend_error_keeps_cause() {
    let h = Harness::new(RecordingBackend::new().failing_at(Phase::Uploading));
    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Never))
        .await;

    let VerificationOutcome::Failed { error, .. } = outcome else {
        panic!("expected failure");
    };
    let chain = format!("{:#}", anyhow::Error::new(error));
    assert_eq!(chain, "uploading phase failed: upload refused by platform");
}

#[tokio::test]
async fn test_content_fetch_failure_never_creates_or_deletes() {
    let h = Harness::with_content(RecordingBackend::new(), FailingContent);

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    let VerificationOutcome::Failed { app_name, error, report, .. } = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(app_name.as_deref(), Some(NAME));
    assert!(matches!(error, PushError::ContentFetchFailed { .. }));
    assert_eq!(*report, PhaseReport::default());
    assert_eq!(h.backend.calls(), vec!["has_buildpack:go_buildpack"]);
}

// ── Warnings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_failure_is_a_warning_on_success() {
    let h = Harness::new(RecordingBackend::new().failing_probe());

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Never))
        .await;

    assert!(outcome.is_success());
    assert!(matches!(
        outcome.warnings(),
        [RunWarning::ProbeFailed { app_name, .. }] if app_name == NAME
    ));
    assert_eq!(h.reporter.warnings().len(), 1);
}

#[tokio::test]
async fn test_cleanup_failure_is_a_warning_on_success() {
    let h = Harness::new(RecordingBackend::new().failing_delete());

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    assert!(outcome.is_success());
    assert!(matches!(
        outcome.warnings(),
        [RunWarning::CleanupFailed { reason, .. }] if reason.contains("app locked")
    ));
}

#[tokio::test]
async fn test_cleanup_failure_does_not_change_failure_phase() {
    let h = Harness::new(
        RecordingBackend::new()
            .failing_at(Phase::Creating)
            .failing_delete(),
    );

    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    assert_eq!(outcome.failed_phase(), Some(Phase::Creating));
    assert_eq!(outcome.warnings().len(), 1);
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_no_ping_skips_probe() {
    let h = Harness::new(RecordingBackend::new());
    let settings = PushSettings {
        no_ping: true,
        ..settings(CleanupDecision::Always)
    };

    let outcome = h.services().push(&GOLANG, &settings).await;

    assert!(outcome.is_success());
    assert!(h.backend.calls_to("probe").is_empty());
    assert_eq!(h.backend.calls_to("delete").len(), 1);
}

#[tokio::test]
async fn test_never_policy_keeps_successful_app() {
    let h = Harness::new(RecordingBackend::new());
    let outcome = h
        .services()
        .push(&GOLANG, &settings(CleanupDecision::Never))
        .await;

    assert!(outcome.is_success());
    assert!(h.backend.calls_to("delete").is_empty());
}

#[tokio::test]
async fn test_reporter_sees_each_phase() {
    let h = Harness::new(RecordingBackend::new());
    h.services()
        .push(&GOLANG, &settings(CleanupDecision::Always))
        .await;

    let steps = h.reporter.steps.lock().expect("lock").clone();
    assert_eq!(
        steps,
        vec![
            format!("Creating app {NAME}..."),
            "Uploading 15 bytes...".to_string(),
            "Staging with go_buildpack...".to_string(),
            format!("Starting {NAME}..."),
            format!("Probing {NAME}..."),
            format!("Deleting {NAME}..."),
        ]
    );
}
