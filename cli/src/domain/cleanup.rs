//! Cleanup policy for applications pushed during verification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Whether a pushed application is deleted after its verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupDecision {
    /// Leave the application in place no matter how the push went.
    Never,
    /// Remove the application after every push attempt.
    #[default]
    Always,
    /// Remove the application only if the push went through without issues.
    OnSuccess,
}

impl CleanupDecision {
    /// Accepted spellings, in help order.
    pub const VARIANTS: [&'static str; 3] = ["always", "never", "on-success"];

    /// Truth table: `Never` → false, `Always` → true, `OnSuccess` → `succeeded`.
    #[must_use]
    pub fn should_delete(self, succeeded: bool) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::OnSuccess => succeeded,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::OnSuccess => "on-success",
        }
    }
}

impl FromStr for CleanupDecision {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "on-success" => Ok(Self::OnSuccess),
            other => Err(ConfigError::UnknownCleanupPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CleanupDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
