//! Random application names.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::application::ports::NameGenerator;

/// Target length of a generated application name.
pub const NAME_LENGTH: usize = 32;

/// Minimum number of random characters, however long the prefix is.
pub const MIN_SUFFIX: usize = 8;

/// `NameGenerator` that appends lowercase alphanumerics from the thread RNG.
///
/// Names stay valid route hostnames, so the probe can reach the app under
/// its own name.
pub struct RandomNameGenerator;

impl NameGenerator for RandomNameGenerator {
    fn generate(&self, prefix: &str) -> String {
        let len = NAME_LENGTH.saturating_sub(prefix.len()).max(MIN_SUFFIX);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("{prefix}{suffix}")
    }
}
