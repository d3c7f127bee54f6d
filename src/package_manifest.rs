//! Reading the addon's `package.json`.

use crate::error::{PublishError, Result};
use camino::Utf8Path;
use log::debug;
use serde::Deserialize;

/// Filename of the package manifest at the repository root.
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// The subset of `package.json` the publisher reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    /// The package version embedded in the artefact name.
    pub version: String,
}

/// Read and parse the package manifest at `path`.
///
/// # Errors
///
/// Returns [`PublishError::ManifestRead`] if the file cannot be read and
/// [`PublishError::ManifestParse`] if it is not JSON with a string
/// `version` field.
pub fn read_package_manifest(path: &Utf8Path) -> Result<PackageManifest> {
    let contents = std::fs::read_to_string(path).map_err(|source| PublishError::ManifestRead {
        path: path.to_owned(),
        source,
    })?;
    let manifest: PackageManifest =
        serde_json::from_str(&contents).map_err(|source| PublishError::ManifestParse {
            path: path.to_owned(),
            source,
        })?;
    debug!("package manifest {path}: version={}", manifest.version);
    Ok(manifest)
}
