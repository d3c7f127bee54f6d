//! Addon publisher library.
//!
//! This crate stages a freshly built Node.js native addon under a versioned,
//! platform-qualified filename, optionally gzip-compressing it, and records
//! the staged path in the CI environment file for later pipeline steps. It
//! backs the `addon-publisher` binary and can be driven programmatically in
//! tests.
//!
//! # Modules
//!
//! - [`artefact`] - Qualifier newtypes, binary type, and artefact naming
//! - [`build_config`] - `config.gypi` parsing
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types
//! - [`layout`] - Repository path layout
//! - [`package_manifest`] - `package.json` parsing
//! - [`pipeline`] - Plan and execute the publish flow
//! - [`scanner`] - Release binary discovery
//! - [`signal`] - Environment-file recording of the staged path
//! - [`stager`] - Copying and compressing into the staging directory

pub mod artefact;
pub mod build_config;
pub mod cli;
pub mod error;
pub mod layout;
pub mod package_manifest;
pub mod pipeline;
pub mod scanner;
pub mod signal;
pub mod stager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
