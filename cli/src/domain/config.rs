//! Push settings and the optional `~/.gonut/config.yaml` schema.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::cleanup::CleanupDecision;
use crate::domain::error::ConfigError;

// ── Summary mode ─────────────────────────────────────────────────────────────

/// How much is printed after each push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Quiet,
    #[default]
    Short,
    Json,
    Yaml,
    Full,
}

impl SummaryMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Short => "short",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Full => "full",
        }
    }

    /// Machine-readable modes must keep stdout free of progress chatter.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

impl FromStr for SummaryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "short" | "oneline" => Ok(Self::Short),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::UnknownSummaryMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Config file schema ───────────────────────────────────────────────────────

/// Contents of the optional config file. Values stay raw strings so that an
/// invalid setting is reported with the config error types, not as a YAML
/// parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GonutConfig {
    pub delete: Option<String>,
    pub summary: Option<String>,
    pub no_ping: Option<bool>,
}

// ── Resolved settings ────────────────────────────────────────────────────────

/// Explicit settings for one `gonut push` invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushSettings {
    pub cleanup: CleanupDecision,
    pub summary: SummaryMode,
    /// Skip the reachability probe after the app started.
    pub no_ping: bool,
}

/// Values given on the command line or through environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingOverrides {
    pub cleanup: Option<CleanupDecision>,
    pub summary: Option<SummaryMode>,
    pub no_ping: bool,
}

impl PushSettings {
    /// Layer overrides on top of the config file on top of the defaults.
    ///
    /// `no_ping` is a switch that can only be turned on: `no_ping: true` in
    /// the config file holds even when no override sets it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file holds an unsupported `delete` or
    /// `summary` value, even when an override would replace it.
    pub fn resolve(file: &GonutConfig, overrides: SettingOverrides) -> Result<Self, ConfigError> {
        let file_cleanup = file.delete.as_deref().map(str::parse::<CleanupDecision>).transpose()?;
        let file_summary = file.summary.as_deref().map(str::parse::<SummaryMode>).transpose()?;

        Ok(Self {
            cleanup: overrides.cleanup.or(file_cleanup).unwrap_or_default(),
            summary: overrides.summary.or(file_summary).unwrap_or_default(),
            no_ping: overrides.no_ping || file.no_ping.unwrap_or(false),
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
