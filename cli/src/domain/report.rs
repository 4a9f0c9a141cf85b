//! Phase boundary timestamps of a single push and the durations derived
//! from them.
//!
//! A report is stamped sequentially by one orchestrator run. Any boundary the
//! run never reached stays `None`, and every duration that depends on an
//! unset boundary is `None` as well. Durations are never negative: if a
//! wall-clock step backwards makes a later stamp precede an earlier one, the
//! duration is reported as `None` rather than as a negative value.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The six ordered timestamps of a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    RunStart,
    CreatingStart,
    UploadingStart,
    StagingStart,
    StartingStart,
    RunEnd,
}

impl Boundary {
    /// All boundaries in declared order.
    pub const ALL: [Boundary; 6] = [
        Boundary::RunStart,
        Boundary::CreatingStart,
        Boundary::UploadingStart,
        Boundary::StagingStart,
        Boundary::StartingStart,
        Boundary::RunEnd,
    ];
}

/// The five phases delimited by adjacent boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Init,
    Creating,
    Uploading,
    Staging,
    Starting,
}

impl Phase {
    /// All phases in declared order.
    pub const ALL: [Phase; 5] = [
        Phase::Init,
        Phase::Creating,
        Phase::Uploading,
        Phase::Staging,
        Phase::Starting,
    ];

    /// Boundary stamped when the phase begins.
    #[must_use]
    pub fn start(self) -> Boundary {
        match self {
            Phase::Init => Boundary::RunStart,
            Phase::Creating => Boundary::CreatingStart,
            Phase::Uploading => Boundary::UploadingStart,
            Phase::Staging => Boundary::StagingStart,
            Phase::Starting => Boundary::StartingStart,
        }
    }

    /// Boundary stamped when the phase ends.
    #[must_use]
    pub fn end(self) -> Boundary {
        match self {
            Phase::Init => Boundary::CreatingStart,
            Phase::Creating => Boundary::UploadingStart,
            Phase::Uploading => Boundary::StagingStart,
            Phase::Staging => Boundary::StartingStart,
            Phase::Starting => Boundary::RunEnd,
        }
    }

    /// Lower-case label used in messages and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Creating => "creating",
            Phase::Uploading => "uploading",
            Phase::Staging => "staging",
            Phase::Starting => "starting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timestamps of one push, one slot per [`Boundary`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseReport {
    pub run_start: Option<DateTime<Utc>>,
    pub creating_start: Option<DateTime<Utc>>,
    pub uploading_start: Option<DateTime<Utc>>,
    pub staging_start: Option<DateTime<Utc>>,
    pub starting_start: Option<DateTime<Utc>>,
    pub run_end: Option<DateTime<Utc>>,
}

impl PhaseReport {
    /// Record `at` as the timestamp of `boundary`.
    pub fn stamp(&mut self, boundary: Boundary, at: DateTime<Utc>) {
        *self.slot_mut(boundary) = Some(at);
    }

    /// Timestamp of `boundary`, or `None` if it was never reached.
    #[must_use]
    pub fn at(&self, boundary: Boundary) -> Option<DateTime<Utc>> {
        match boundary {
            Boundary::RunStart => self.run_start,
            Boundary::CreatingStart => self.creating_start,
            Boundary::UploadingStart => self.uploading_start,
            Boundary::StagingStart => self.staging_start,
            Boundary::StartingStart => self.starting_start,
            Boundary::RunEnd => self.run_end,
        }
    }

    fn slot_mut(&mut self, boundary: Boundary) -> &mut Option<DateTime<Utc>> {
        match boundary {
            Boundary::RunStart => &mut self.run_start,
            Boundary::CreatingStart => &mut self.creating_start,
            Boundary::UploadingStart => &mut self.uploading_start,
            Boundary::StagingStart => &mut self.staging_start,
            Boundary::StartingStart => &mut self.starting_start,
            Boundary::RunEnd => &mut self.run_end,
        }
    }

    /// Duration of `phase`. `None` until both of its boundaries are stamped.
    #[must_use]
    pub fn duration(&self, phase: Phase) -> Option<Duration> {
        between(self.at(phase.start()), self.at(phase.end()))
    }

    /// Time from run start to run end. `None` until the run completed.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        between(self.run_start, self.run_end)
    }

    /// `true` when every boundary has been stamped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Boundary::ALL.iter().all(|b| self.at(*b).is_some())
    }

    /// `true` when the stamped boundaries form a gap-free prefix of the
    /// declared order and never decrease.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        let mut previous: Option<DateTime<Utc>> = None;
        let mut seen_unset = false;
        for boundary in Boundary::ALL {
            match self.at(boundary) {
                Some(at) => {
                    if seen_unset || previous.is_some_and(|p| at < p) {
                        return false;
                    }
                    previous = Some(at);
                }
                None => seen_unset = true,
            }
        }
        true
    }
}

fn between(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Option<Duration> {
    (to? - from?).to_std().ok()
}

/// Render a duration for humans: `850ms`, `12.3s`, `2m 14s`, `1h 3m`.
#[must_use]
pub fn human_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs >= 1 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
