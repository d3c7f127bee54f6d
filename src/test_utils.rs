//! Scratch addon repositories for tests.
//!
//! Builds a throwaway checkout shaped like a node-gyp build: a
//! `package.json`, a `build/config.gypi` with its comment banner, and a
//! `build/Release` directory ready for `.node` files.

use crate::layout::RepoLayout;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use tempfile::TempDir;

/// Banner node-gyp writes ahead of the JSON body of `config.gypi`.
pub const CONFIG_BANNER: &str =
    "# Do not edit. File was generated by node-gyp's \"configure\" step\n";

/// A temporary addon repository, removed when dropped.
#[derive(Debug)]
pub struct ScratchRepo {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ScratchRepo {
    /// Create an empty scratch repository.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temporary directory cannot be created or
    /// its path is not valid UTF-8.
    pub fn empty() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf())
            .map_err(camino::FromPathBufError::into_io_error)?;
        Ok(Self { _dir: dir, root })
    }

    /// Create a repository with version `1.2.3`, module version `115`,
    /// architecture `x64`, and an empty release directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if any fixture file cannot be written.
    pub fn with_defaults() -> io::Result<Self> {
        let repo = Self::empty()?;
        repo.write_build_config("115", "x64")?;
        repo.write_package_manifest("1.2.3")?;
        repo.create_release_dir()?;
        Ok(repo)
    }

    /// Return the repository root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Return the layout rooted at this repository.
    #[must_use]
    pub fn layout(&self) -> RepoLayout {
        RepoLayout::new(self.root.clone())
    }

    /// Return a path for the pipeline environment file, outside `build/`.
    #[must_use]
    pub fn env_file_path(&self) -> Utf8PathBuf {
        self.root.join("github_env")
    }

    /// Write `config.gypi` with the given module version and architecture.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_build_config(&self, module_version: &str, target_arch: &str) -> io::Result<()> {
        let body = serde_json::json!({
            "target_defaults": { "default_configuration": "Release" },
            "variables": {
                "node_module_version": module_version.parse::<u64>().map_or_else(
                    |_| serde_json::Value::from(module_version),
                    serde_json::Value::from,
                ),
                "target_arch": target_arch,
            },
        });
        self.write_raw_build_config(&format!("{CONFIG_BANNER}{body:#}\n"))
    }

    /// Write `config.gypi` verbatim.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_raw_build_config(&self, contents: &str) -> io::Result<()> {
        let path = self.layout().build_config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    /// Write `package.json` with the given version.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_package_manifest(&self, version: &str) -> io::Result<()> {
        let body = serde_json::json!({ "name": "scratch-addon", "version": version });
        fs::write(self.layout().package_manifest_path(), format!("{body:#}\n"))
    }

    /// Create `build/Release` without any binaries.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn create_release_dir(&self) -> io::Result<()> {
        fs::create_dir_all(self.layout().release_dir())
    }

    /// Add a file to `build/Release` and return its path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn add_release_file(&self, name: &str, contents: &[u8]) -> io::Result<Utf8PathBuf> {
        self.create_release_dir()?;
        let path = self.layout().release_dir().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
