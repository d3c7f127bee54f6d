//! Artefact naming and the validated values that feed it.
//!
//! # Sub-modules
//!
//! - [`binary_type`] - Plain copy versus gzip output (`BinaryType`).
//! - [`error`] - Validation errors for invocation arguments.
//! - [`naming`] - Versioned artefact filename policy (`ArtefactName`).
//! - [`qualifiers`] - Node-API, platform, and libc newtypes.

pub mod binary_type;
pub mod error;
pub mod naming;
pub mod qualifiers;
