//! Application service — run several sample app pushes in sequence.

use crate::application::ports::{
    Clock, ContentSource, NameGenerator, ProgressReporter, PushBackend,
};
use crate::application::services::push::PushServices;
use crate::domain::{PushSettings, SampleApp, VerificationOutcome};

/// One finished run of a batch.
#[derive(Debug)]
pub struct RunRecord<'a> {
    pub app: &'a SampleApp,
    pub outcome: VerificationOutcome,
}

/// Runs of a batch in execution order. When the batch halted, the failed
/// run is the last record.
#[derive(Debug, Default)]
pub struct BatchSummary<'a> {
    pub runs: Vec<RunRecord<'a>>,
}

impl<'a> BatchSummary<'a> {
    /// The failed run that stopped the batch, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&RunRecord<'a>> {
        self.runs.last().filter(|r| r.outcome.is_failed())
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.runs.iter().filter(|r| r.outcome.is_success()).count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.runs.iter().filter(|r| r.outcome.is_skipped()).count()
    }
}

/// Push every app in order, stopping after the first failed run.
///
/// `on_finished` sees each record as soon as its run completes, so output
/// can be streamed while the batch is still going. Skipped runs never stop
/// the batch.
pub async fn run_batch<'a, B, S, N, K, R>(
    services: &PushServices<'_, B, S, N, K, R>,
    apps: impl IntoIterator<Item = &'a SampleApp>,
    settings: &PushSettings,
    mut on_finished: impl FnMut(&RunRecord<'a>),
) -> BatchSummary<'a>
where
    B: PushBackend,
    S: ContentSource,
    N: NameGenerator,
    K: Clock,
    R: ProgressReporter,
{
    let mut summary = BatchSummary::default();

    for app in apps {
        let record = RunRecord {
            app,
            outcome: services.push(app, settings).await,
        };
        on_finished(&record);
        let halt = record.outcome.is_failed();
        summary.runs.push(record);
        if halt {
            tracing::info!(app = app.selector, "stopping batch after failed push");
            break;
        }
    }

    summary
}
