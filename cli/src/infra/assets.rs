//! Embedded sample apps — compiled into the CLI binary.
//!
//! At compile time, `include_dir!` embeds everything under
//! `assets/sample-apps/`, one directory per catalog asset key.

use std::path::Path;

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

use crate::application::ports::ContentSource;
use crate::domain::{Bundle, BundleFile};

/// All sample apps, compiled in at build time.
static SAMPLE_APPS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/sample-apps");

/// `ContentSource` backed by the embedded sample apps.
pub struct EmbeddedSampleApps;

impl ContentSource for EmbeddedSampleApps {
    async fn fetch(&self, asset: &str) -> Result<Bundle> {
        bundle_for(asset)
    }
}

/// Collect the files of one embedded sample app.
///
/// # Errors
///
/// Returns an error if no sample app is embedded under `asset` or if it is empty.
pub fn bundle_for(asset: &str) -> Result<Bundle> {
    let dir = SAMPLE_APPS
        .get_dir(asset)
        .with_context(|| format!("embedded sample app not found: {asset}"))?;

    let mut files = Vec::new();
    collect(dir, Path::new(asset), &mut files)?;
    if files.is_empty() {
        anyhow::bail!("embedded sample app {asset} has no files");
    }
    Ok(Bundle { files })
}

fn collect(dir: &Dir<'_>, root: &Path, out: &mut Vec<BundleFile>) -> Result<()> {
    for file in dir.files() {
        let path = file
            .path()
            .strip_prefix(root)
            .with_context(|| format!("unexpected asset path {}", file.path().display()))?
            .to_path_buf();
        out.push(BundleFile {
            executable: is_executable(&path),
            path,
            contents: file.contents().to_vec(),
        });
    }
    for sub in dir.dirs() {
        collect(sub, root, out)?;
    }
    Ok(())
}

/// Start scripts and anything under `bin/` must keep the executable bit.
fn is_executable(path: &Path) -> bool {
    path.starts_with("bin") || path.extension().is_some_and(|e| e == "sh")
}
