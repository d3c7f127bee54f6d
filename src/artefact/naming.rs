//! Artefact naming policy for staged addon binaries.
//!
//! Constructs deterministic filenames in the format consumed by the
//! prebuilt-binary downloaders:
//! `v<version>-m<module>-n<napi>-<platform>-<libc>-<arch>.node[.gz]`.
//! Field order and the `v`/`m`/`n` markers must not change.

use super::binary_type::BinaryType;
use super::qualifiers::Qualifiers;
use crate::build_config::BuildVariables;
use std::fmt;

/// The fixed extension of a native addon.
const ADDON_EXTENSION: &str = ".node";

/// A fully-qualified artefact filename.
///
/// # Examples
///
/// ```
/// use addon_publisher::artefact::binary_type::BinaryType;
/// use addon_publisher::artefact::naming::ArtefactName;
/// use addon_publisher::artefact::qualifiers::Qualifiers;
/// use addon_publisher::build_config::parse_build_config;
///
/// let variables = parse_build_config(
///     r#"# generated
///     {"variables": {"node_module_version": 115, "target_arch": "x64"}}"#,
/// )
/// .expect("valid build config");
/// let qualifiers = Qualifiers::from_args(Some("8"), Some("linux"), Some("glibc"))
///     .expect("valid qualifiers");
///
/// let name = ArtefactName::new("1.2.3", &variables, qualifiers, BinaryType::Plain);
/// assert_eq!(name.to_string(), "v1.2.3-m115-n8-linux-glibc-x64.node");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    package_version: String,
    module_version: String,
    target_arch: String,
    qualifiers: Qualifiers,
    binary_type: BinaryType,
}

impl ArtefactName {
    /// Create an artefact name from the package version, build variables,
    /// and invocation qualifiers.
    #[must_use]
    pub fn new(
        package_version: impl Into<String>,
        variables: &BuildVariables,
        qualifiers: Qualifiers,
        binary_type: BinaryType,
    ) -> Self {
        Self {
            package_version: package_version.into(),
            module_version: variables.node_module_version.as_str().to_owned(),
            target_arch: variables.target_arch.clone(),
            qualifiers,
            binary_type,
        }
    }

    /// Return the package version component.
    #[must_use]
    pub fn package_version(&self) -> &str {
        &self.package_version
    }

    /// Return the module (ABI) version component.
    #[must_use]
    pub fn module_version(&self) -> &str {
        &self.module_version
    }

    /// Return the target architecture component.
    #[must_use]
    pub fn target_arch(&self) -> &str {
        &self.target_arch
    }

    /// Return the invocation qualifiers.
    #[must_use]
    pub const fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    /// Return the output encoding.
    #[must_use]
    pub const fn binary_type(&self) -> BinaryType {
        self.binary_type
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{}-m{}-n{}-{}-{}-{}{ADDON_EXTENSION}{}",
            self.package_version,
            self.module_version,
            self.qualifiers.napi_version,
            self.qualifiers.platform,
            self.qualifiers.libc,
            self.target_arch,
            self.binary_type.extension(),
        )
    }
}
