//! Error types for artefact argument validation.

use thiserror::Error;

/// Errors arising from invalid artefact qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtefactError {
    /// A required argument was absent or empty.
    #[error("missing {argument} argument")]
    MissingArgument {
        /// Human-readable name of the argument.
        argument: &'static str,
    },
}

/// Result type alias using [`ArtefactError`].
pub type Result<T> = std::result::Result<T, ArtefactError>;
