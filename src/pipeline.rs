//! Publish pipeline orchestration.
//!
//! Publishing is split into a read-only planning phase and an executing
//! phase. Planning reads the build configuration and package manifest and
//! locates the release binary; nothing is written until [`execute`] runs.
//! Execution creates the staging directory, writes the artefact, and records
//! its path, in that order, stopping at the first failure.

use crate::artefact::binary_type::BinaryType;
use crate::artefact::naming::ArtefactName;
use crate::artefact::qualifiers::Qualifiers;
use crate::build_config::read_build_config;
use crate::error::Result;
use crate::layout::RepoLayout;
use crate::package_manifest::read_package_manifest;
use crate::scanner::find_release_binary;
use crate::signal::PathRecorder;
use crate::stager::Stager;
use camino::Utf8PathBuf;
use log::info;
use std::fmt;

/// Everything needed to publish one addon binary.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// The repository checkout holding the build output.
    pub layout: RepoLayout,
    /// Directory the artefact is staged into.
    pub out_dir: Utf8PathBuf,
    /// Validated invocation qualifiers.
    pub qualifiers: Qualifiers,
    /// Plain copy or gzip.
    pub binary_type: BinaryType,
}

impl PublishRequest {
    /// Create a request staging into the layout's default `build/prepared`.
    #[must_use]
    pub fn new(layout: RepoLayout, qualifiers: Qualifiers, binary_type: BinaryType) -> Self {
        let out_dir = layout.prepared_dir();
        Self {
            layout,
            out_dir,
            qualifiers,
            binary_type,
        }
    }

    /// Replace the staging directory.
    #[must_use]
    pub fn with_out_dir(mut self, out_dir: Utf8PathBuf) -> Self {
        self.out_dir = out_dir;
        self
    }
}

/// The outcome of planning: which binary goes where, under what name.
#[derive(Debug, Clone)]
pub struct PublishPlan {
    /// The release binary that will be staged.
    pub source: Utf8PathBuf,
    /// The artefact name it will be staged under.
    pub artefact_name: ArtefactName,
    /// The stager targeting the output directory.
    pub stager: Stager,
}

impl PublishPlan {
    /// Return the full path the artefact will be written to.
    #[must_use]
    pub fn artefact_path(&self) -> Utf8PathBuf {
        self.stager.artefact_path(&self.artefact_name)
    }

    /// Return a `<source> => <artefact>` rename announcement.
    #[must_use]
    pub fn announcement(&self) -> Announcement<'_> {
        Announcement(self)
    }
}

/// Display adapter printing `<source filename> => <artefact filename>`.
#[derive(Debug)]
pub struct Announcement<'a>(&'a PublishPlan);

impl fmt::Display for Announcement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.0.source.file_name().unwrap_or(self.0.source.as_str());
        write!(f, "{source} => {}", self.0.artefact_name)
    }
}

/// A successfully published artefact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The release binary that was staged.
    pub source: Utf8PathBuf,
    /// The written artefact, as recorded for the pipeline.
    pub artefact_path: Utf8PathBuf,
}

/// Read the build metadata and locate the release binary.
///
/// No files are created or modified.
///
/// # Errors
///
/// Returns the configuration, manifest, or scan error encountered first.
pub fn plan(request: &PublishRequest) -> Result<PublishPlan> {
    let layout = &request.layout;
    let variables = read_build_config(&layout.build_config_path())?;
    let manifest = read_package_manifest(&layout.package_manifest_path())?;
    let source = find_release_binary(&layout.release_dir())?;

    let artefact_name = ArtefactName::new(
        manifest.version,
        &variables,
        request.qualifiers.clone(),
        request.binary_type,
    );

    Ok(PublishPlan {
        source,
        artefact_name,
        stager: Stager::new(request.out_dir.clone()),
    })
}

/// Stage the planned artefact and record its path.
///
/// The path is handed to `recorder` only after the artefact is completely
/// written, so a recorded path never refers to a partial file.
///
/// # Errors
///
/// Returns the staging or recording error encountered first. A recording
/// failure leaves the staged artefact on disk.
pub fn execute(plan: &PublishPlan, recorder: &dyn PathRecorder) -> Result<PublishOutcome> {
    plan.stager.prepare()?;
    let artefact_path = plan.stager.stage(&plan.source, &plan.artefact_name)?;
    recorder.record(&artefact_path)?;
    info!("published {} as {artefact_path}", plan.source);

    Ok(PublishOutcome {
        source: plan.source.clone(),
        artefact_path,
    })
}

/// Plan and execute in one step.
///
/// # Errors
///
/// Returns the first error from [`plan`] or [`execute`].
pub fn publish(request: &PublishRequest, recorder: &dyn PathRecorder) -> Result<PublishOutcome> {
    execute(&plan(request)?, recorder)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
