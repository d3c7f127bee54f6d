//! Invocation-supplied qualifiers embedded in the artefact name.
//!
//! The Node-API version, platform, and libc variant arrive as positional
//! arguments from the calling pipeline. Each must be non-empty; the value is
//! otherwise taken verbatim so consumers parsing the artefact name see
//! exactly what the pipeline passed in.

use super::error::{ArtefactError, Result};
use std::fmt;

/// Declare a non-empty string newtype named after its argument.
macro_rules! qualifier {
    ($(#[$meta:meta])* $name:ident, $argument:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// The argument name used in validation messages.
            pub const ARGUMENT: &'static str = $argument;

            /// Return the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ArtefactError;

            fn try_from(value: &str) -> Result<Self> {
                require_non_empty(value, Self::ARGUMENT).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ArtefactError;

            fn try_from(value: String) -> Result<Self> {
                Self::try_from(value.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

qualifier!(
    /// Node-API ABI version tag (for example `8`).
    NapiVersion,
    "node API"
);

qualifier!(
    /// Target platform tag (for example `linux` or `darwin`).
    Platform,
    "platform"
);

qualifier!(
    /// C standard library flavour (for example `glibc` or `musl`).
    LibcVariant,
    "libc"
);

fn require_non_empty(value: &str, argument: &'static str) -> Result<String> {
    if value.is_empty() {
        Err(ArtefactError::MissingArgument { argument })
    } else {
        Ok(value.to_owned())
    }
}

/// The three invocation qualifiers, validated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifiers {
    /// Node-API version tag.
    pub napi_version: NapiVersion,
    /// Platform tag.
    pub platform: Platform,
    /// libc variant tag.
    pub libc: LibcVariant,
}

impl Qualifiers {
    /// Validate raw positional arguments in order.
    ///
    /// An absent argument is treated the same as an empty one. The first
    /// failure is reported, so a missing Node-API version is named even when
    /// the platform and libc are also missing.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::MissingArgument`] naming the first argument
    /// that is absent or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_publisher::artefact::qualifiers::Qualifiers;
    ///
    /// let q = Qualifiers::from_args(Some("8"), Some("linux"), Some("musl"))
    ///     .expect("all arguments present");
    /// assert_eq!(q.libc.as_str(), "musl");
    ///
    /// let err = Qualifiers::from_args(Some("8"), None, Some("musl"))
    ///     .expect_err("platform is missing");
    /// assert_eq!(err.to_string(), "missing platform argument");
    /// ```
    pub fn from_args(
        napi_version: Option<&str>,
        platform: Option<&str>,
        libc: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            napi_version: NapiVersion::try_from(napi_version.unwrap_or_default())?,
            platform: Platform::try_from(platform.unwrap_or_default())?,
            libc: LibcVariant::try_from(libc.unwrap_or_default())?,
        })
    }
}
