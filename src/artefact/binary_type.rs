//! Output encoding selected by the binary MIME type argument.

use super::error::{ArtefactError, Result};

/// The MIME type that selects gzip compression.
pub const GZIP_MIME_TYPE: &str = "application/gzip";

/// How the release binary is written into the staging directory.
///
/// The MIME type is compared verbatim against [`GZIP_MIME_TYPE`]; any other
/// non-empty value selects a plain copy.
///
/// # Examples
///
/// ```
/// use addon_publisher::artefact::binary_type::BinaryType;
///
/// let gzip = BinaryType::try_from("application/gzip").expect("present");
/// assert_eq!(gzip, BinaryType::Gzip);
/// assert_eq!(gzip.extension(), ".gz");
///
/// let plain = BinaryType::try_from("application/octet-stream").expect("present");
/// assert_eq!(plain, BinaryType::Plain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryType {
    /// Stream the binary through a maximum-level gzip encoder.
    Gzip,
    /// Copy the binary byte for byte.
    Plain,
}

impl BinaryType {
    /// The argument name used in validation messages.
    pub const ARGUMENT: &'static str = "binary type";

    /// Select the output encoding for a MIME type string.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime == GZIP_MIME_TYPE {
            Self::Gzip
        } else {
            Self::Plain
        }
    }

    /// Suffix appended after the `.node` extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => ".gz",
            Self::Plain => "",
        }
    }

    /// Whether this output is compressed.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Gzip)
    }
}

impl TryFrom<&str> for BinaryType {
    type Error = ArtefactError;

    fn try_from(value: &str) -> Result<Self> {
        if value.is_empty() {
            Err(ArtefactError::MissingArgument {
                argument: Self::ARGUMENT,
            })
        } else {
            Ok(Self::from_mime(value))
        }
    }
}
