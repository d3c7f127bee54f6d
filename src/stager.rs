//! Staging of the release binary under its artefact name.
//!
//! This module creates the staging directory and writes the artefact into it,
//! either as a byte-for-byte copy or as a maximum-level gzip stream. A staged
//! path is only returned once the file is completely written.

use crate::artefact::binary_type::BinaryType;
use crate::artefact::naming::ArtefactName;
use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};

/// Handles staging of the release binary into the output directory.
#[derive(Debug, Clone)]
pub struct Stager {
    out_dir: Utf8PathBuf,
}

impl Stager {
    /// Create a stager writing into `out_dir`.
    #[must_use]
    pub const fn new(out_dir: Utf8PathBuf) -> Self {
        Self { out_dir }
    }

    /// Return the staging directory.
    #[must_use]
    pub fn out_dir(&self) -> &Utf8Path {
        &self.out_dir
    }

    /// Ensure the staging directory and its parents exist.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::StagingFailed`] if the directory cannot be
    /// created.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.out_dir).map_err(|source| PublishError::StagingFailed {
            path: self.out_dir.clone(),
            source,
        })
    }

    /// Return the path `name` will be staged at.
    #[must_use]
    pub fn artefact_path(&self, name: &ArtefactName) -> Utf8PathBuf {
        self.out_dir.join(name.filename())
    }

    /// Stage `source` under `name`, compressing when the name calls for it.
    ///
    /// [`Stager::prepare`] must have succeeded first.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::CopyFailed`] or
    /// [`PublishError::CompressionFailed`] if the artefact cannot be written.
    pub fn stage(&self, source: &Utf8Path, name: &ArtefactName) -> Result<Utf8PathBuf> {
        let dest = self.artefact_path(name);
        match name.binary_type() {
            BinaryType::Gzip => compress_file(source, &dest)?,
            BinaryType::Plain => copy_file(source, &dest)?,
        }
        debug!("staged {source} as {dest}");
        Ok(dest)
    }
}

/// Copy `from` to `to` byte for byte.
///
/// # Errors
///
/// Returns [`PublishError::CopyFailed`] if the copy fails.
pub fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| PublishError::CopyFailed {
            from: from.to_owned(),
            to: to.to_owned(),
            source,
        })
}

/// Gzip `from` into a new file at `to` using the best compression level.
///
/// Returns only after the encoder has written the gzip trailer and the file
/// has been synced to storage.
///
/// # Errors
///
/// Returns [`PublishError::CompressionFailed`] if reading, encoding, or
/// writing fails.
pub fn compress_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    write_gzip(from, to).map_err(|source| PublishError::CompressionFailed {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    })
}

fn write_gzip(from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
    let mut reader = BufReader::new(File::open(from)?);
    let writer = BufWriter::new(File::create(to)?);
    let mut encoder = GzEncoder::new(writer, Compression::best());
    io::copy(&mut reader, &mut encoder)?;
    let file = encoder
        .finish()?
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.sync_all()
}
