//! Repository path layout for a node-gyp addon checkout.
//!
//! All paths derive from the repository root:
//!
//! ```text
//! <root>/package.json
//! <root>/build/config.gypi
//! <root>/build/Release/*.node
//! <root>/build/prepared/          (staging directory)
//! ```

use crate::build_config::BUILD_CONFIG_FILE;
use crate::error::{PublishError, Result};
use crate::package_manifest::PACKAGE_MANIFEST_FILE;
use camino::{Utf8Path, Utf8PathBuf};

/// Paths inside an addon repository checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    root: Utf8PathBuf,
}

impl RepoLayout {
    /// Create a layout rooted at `root` as given.
    #[must_use]
    pub const fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// Create a layout rooted at the absolute form of `root`.
    ///
    /// Relative roots are resolved against the current directory so every
    /// derived path, including the recorded artefact path, is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::InvalidPath`] if the current directory cannot
    /// be determined.
    pub fn resolve(root: &Utf8Path) -> Result<Self> {
        absolute(root).map(Self::new)
    }

    /// Return the repository root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Return `<root>/build`.
    #[must_use]
    pub fn build_dir(&self) -> Utf8PathBuf {
        self.root.join("build")
    }

    /// Return `<root>/build/config.gypi`.
    #[must_use]
    pub fn build_config_path(&self) -> Utf8PathBuf {
        self.build_dir().join(BUILD_CONFIG_FILE)
    }

    /// Return `<root>/build/Release`, where node-gyp places the addon.
    #[must_use]
    pub fn release_dir(&self) -> Utf8PathBuf {
        self.build_dir().join("Release")
    }

    /// Return the default staging directory, `<root>/build/prepared`.
    #[must_use]
    pub fn prepared_dir(&self) -> Utf8PathBuf {
        self.build_dir().join("prepared")
    }

    /// Return `<root>/package.json`.
    #[must_use]
    pub fn package_manifest_path(&self) -> Utf8PathBuf {
        self.root.join(PACKAGE_MANIFEST_FILE)
    }
}

/// Return the absolute form of `path` without touching the filesystem.
///
/// Unlike canonicalization this neither requires the path to exist nor
/// resolves symlinks.
///
/// # Errors
///
/// Returns [`PublishError::InvalidPath`] if the current directory cannot be
/// determined or is not valid UTF-8.
pub fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let invalid = |reason: String| PublishError::InvalidPath {
        path: path.to_owned(),
        reason,
    };
    let resolved = std::path::absolute(path).map_err(|e| invalid(e.to_string()))?;
    Utf8PathBuf::try_from(resolved).map_err(|e| invalid(format!("path is not valid UTF-8: {e}")))
}
