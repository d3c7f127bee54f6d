//! Error types for the addon publisher.
//!
//! Every failure the publisher can hit is terminal. Each variant names the
//! file or argument involved so the single diagnostic line printed by the
//! binary is enough to locate the problem.

use crate::artefact::error::ArtefactError;
use crate::build_config::BuildConfigError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing an addon binary.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required positional argument was absent or empty.
    #[error("{0}")]
    MissingArgument(#[from] ArtefactError),

    /// A required path was supplied neither by flag nor by environment.
    #[error("{variable} is not set; pass {flag} or export {variable}")]
    MissingEnvironment {
        /// The environment variable that was expected.
        variable: &'static str,
        /// The equivalent command-line flag.
        flag: &'static str,
    },

    /// A path could not be made absolute.
    #[error("cannot resolve {path}: {reason}")]
    InvalidPath {
        /// The path as supplied.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// The build configuration file could not be read.
    #[error("failed to read build config {path}: {source}")]
    BuildConfigRead {
        /// Path to `config.gypi`.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The build configuration file is not in the expected shape.
    #[error("invalid build config {path}: {source}")]
    BuildConfigParse {
        /// Path to `config.gypi`.
        path: Utf8PathBuf,
        /// What was wrong with the contents.
        #[source]
        source: BuildConfigError,
    },

    /// The package manifest could not be read.
    #[error("failed to read package manifest {path}: {source}")]
    ManifestRead {
        /// Path to `package.json`.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The package manifest is not valid JSON or lacks a string `version`.
    #[error("invalid package manifest {path}: {source}")]
    ManifestParse {
        /// Path to `package.json`.
        path: Utf8PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The release directory could not be listed.
    #[error("failed to scan {path}: {source}")]
    ScanFailed {
        /// The release directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The release directory holds no `.node` files.
    #[error("did not find any release .node files in {path}")]
    NoReleaseBinaries {
        /// The release directory that was scanned.
        path: Utf8PathBuf,
    },

    /// The staging directory could not be created.
    #[error("failed to create staging directory {path}: {source}")]
    StagingFailed {
        /// The staging directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying the binary into the staging directory failed.
    #[error("unable to copy {from} to {to}: {source}")]
    CopyFailed {
        /// The release binary.
        from: Utf8PathBuf,
        /// The intended artefact path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Compressing the binary into the staging directory failed.
    #[error("unable to compress {from} to {to}: {source}")]
    CompressionFailed {
        /// The release binary.
        from: Utf8PathBuf,
        /// The intended artefact path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artefact path could not be appended to the environment file.
    ///
    /// The artefact itself may already exist on disk when this is returned.
    #[error("unable to record binary path in {path}: {source}")]
    SignalFailed {
        /// The environment file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;
