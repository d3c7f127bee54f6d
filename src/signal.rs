//! Recording the staged artefact path for later pipeline steps.
//!
//! CI runners expose an append-only environment file (`GITHUB_ENV`); each
//! `KEY=value` line appended to it becomes an environment variable in
//! subsequent steps.

use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs::OpenOptions;
use std::io::Write;

/// Environment variable naming the pipeline's environment file.
pub const ENV_FILE_VARIABLE: &str = "GITHUB_ENV";

/// Key under which the staged artefact path is recorded.
pub const BINARY_PATH_KEY: &str = "binary_path";

/// Records the staged artefact path somewhere the pipeline can read it.
#[cfg_attr(test, mockall::automock)]
pub trait PathRecorder {
    /// Record `path` as the published binary.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::SignalFailed`] if the record cannot be written.
    fn record(&self, path: &Utf8Path) -> Result<()>;
}

/// Format the line appended for `path`, including the trailing newline.
#[must_use]
pub fn binary_path_line(path: &Utf8Path) -> String {
    format!("{BINARY_PATH_KEY}={path}\n")
}

/// An append-only `KEY=value` environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    path: Utf8PathBuf,
}

impl EnvFile {
    /// Wrap the environment file at `path`.
    #[must_use]
    pub const fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// Return the environment file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl PathRecorder for EnvFile {
    fn record(&self, path: &Utf8Path) -> Result<()> {
        let signal_failed = |source| PublishError::SignalFailed {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(signal_failed)?;
        // A single write keeps the line intact if another step appends too.
        file.write_all(binary_path_line(path).as_bytes())
            .map_err(signal_failed)?;
        debug!("recorded {BINARY_PATH_KEY}={path} in {}", self.path);
        Ok(())
    }
}
