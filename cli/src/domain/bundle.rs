//! In-memory application bundle handed to the deployment backend.

use std::path::PathBuf;

/// A single file of a bundle, with a path relative to the bundle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    /// Whether the file must be executable once written to disk.
    pub executable: bool,
}

/// The files making up one sample application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub files: Vec<BundleFile>,
}

impl Bundle {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all file contents in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.files.iter().map(|f| f.contents.len()).sum()
    }
}
