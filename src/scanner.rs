//! Release binary discovery.
//!
//! node-gyp writes exactly one `.node` file into `build/Release`. The scanner
//! walks the directory listing once and stops at the first entry with the
//! addon extension; any later matches are ignored.

use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::ffi::OsString;
use std::io;

/// Filename suffix identifying a compiled native addon.
pub const ADDON_SUFFIX: &str = ".node";

/// Whether `name` ends with the addon suffix.
#[must_use]
pub fn is_addon_filename(name: &str) -> bool {
    name.ends_with(ADDON_SUFFIX)
}

/// Return the first addon filename in listing order.
///
/// Iteration stops at the first match, so entries after it are never
/// pulled from `names`. Non-UTF-8 names are skipped. An error yielded by
/// `names` before a match is found is returned as-is.
///
/// # Errors
///
/// Propagates the first I/O error produced by `names` before a match.
///
/// # Examples
///
/// ```
/// use addon_publisher::scanner::first_addon_name;
/// use std::ffi::OsString;
///
/// let listing = ["binding.gyp", "ssh.node", "extra.node"]
///     .into_iter()
///     .map(|name| Ok(OsString::from(name)));
/// let first = first_addon_name(listing).expect("listing is readable");
/// assert_eq!(first.as_deref(), Some("ssh.node"));
/// ```
pub fn first_addon_name<I>(names: I) -> io::Result<Option<String>>
where
    I: IntoIterator<Item = io::Result<OsString>>,
{
    for entry in names {
        match entry?.into_string() {
            Ok(name) if is_addon_filename(&name) => return Ok(Some(name)),
            Ok(name) => trace!("skipping {name}: not a native addon"),
            Err(raw) => trace!("skipping non-UTF-8 entry {}", raw.to_string_lossy()),
        }
    }
    Ok(None)
}

/// Locate the release binary inside `release_dir`.
///
/// # Errors
///
/// Returns [`PublishError::ScanFailed`] if the directory cannot be listed and
/// [`PublishError::NoReleaseBinaries`] if it holds no `.node` file.
pub fn find_release_binary(release_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let scan_failed = |source| PublishError::ScanFailed {
        path: release_dir.to_owned(),
        source,
    };
    let entries = release_dir.as_std_path().read_dir().map_err(scan_failed)?;
    let names = entries.map(|entry| entry.map(|e| e.file_name()));

    match first_addon_name(names).map_err(scan_failed)? {
        Some(name) => {
            let path = release_dir.join(name);
            debug!("found release binary {path}");
            Ok(path)
        }
        None => Err(PublishError::NoReleaseBinaries {
            path: release_dir.to_owned(),
        }),
    }
}
