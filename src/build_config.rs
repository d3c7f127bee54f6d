//! Reading the `config.gypi` emitted by the addon's configure step.
//!
//! The file opens with a comment banner followed by a JSON object. Everything
//! from the first `{` onward is parsed as JSON and the nested `variables`
//! mapping supplies the module ABI version and target architecture.

use crate::error::{PublishError, Result};
use camino::Utf8Path;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Filename of the build configuration inside the `build/` directory.
pub const BUILD_CONFIG_FILE: &str = "config.gypi";

/// Problems with the contents of a build configuration.
#[derive(Debug, Error)]
pub enum BuildConfigError {
    /// The text contains no `{`, so there is no JSON object to parse.
    #[error("no JSON object found")]
    MissingObject,

    /// The JSON is malformed or lacks the required `variables` entries.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Native-addon loader ABI version, kept in its textual form.
///
/// `config.gypi` normally stores this as a number, but a string is accepted
/// too so hand-edited configurations still work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ModuleVersion(String);

impl ModuleVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<Value> for ModuleVersion {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Number(number) => Ok(Self(number.to_string())),
            Value::String(text) if !text.is_empty() => Ok(Self(text)),
            other => Err(format!(
                "node_module_version must be a number or non-empty string, found {other}"
            )),
        }
    }
}

/// The `variables` entries the publisher relies on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildVariables {
    /// ABI version of the native-addon loader.
    pub node_module_version: ModuleVersion,
    /// Architecture the addon was compiled for (for example `x64`).
    pub target_arch: String,
}

#[derive(Deserialize)]
struct BuildConfigDocument {
    variables: BuildVariables,
}

/// Parse build configuration text into its [`BuildVariables`].
///
/// # Errors
///
/// Returns [`BuildConfigError::MissingObject`] when the text has no `{`, or
/// [`BuildConfigError::Json`] when the object is malformed or lacks
/// `variables.node_module_version` or `variables.target_arch`.
pub fn parse_build_config(contents: &str) -> std::result::Result<BuildVariables, BuildConfigError> {
    let start = contents.find('{').ok_or(BuildConfigError::MissingObject)?;
    let json = contents.get(start..).ok_or(BuildConfigError::MissingObject)?;
    let document: BuildConfigDocument = serde_json::from_str(json)?;
    Ok(document.variables)
}

/// Read and parse the build configuration at `path`.
///
/// # Errors
///
/// Returns [`PublishError::BuildConfigRead`] if the file cannot be read and
/// [`PublishError::BuildConfigParse`] if its contents are unusable.
pub fn read_build_config(path: &Utf8Path) -> Result<BuildVariables> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| PublishError::BuildConfigRead {
            path: path.to_owned(),
            source,
        })?;
    let variables =
        parse_build_config(&contents).map_err(|source| PublishError::BuildConfigParse {
            path: path.to_owned(),
            source,
        })?;
    debug!(
        "build config {path}: node_module_version={}, target_arch={}",
        variables.node_module_version.as_str(),
        variables.target_arch
    );
    Ok(variables)
}
