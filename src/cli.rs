//! CLI argument definitions for the addon publisher.
//!
//! The four positional arguments are declared optional so that a missing
//! value is reported through the same validation path, and the same message,
//! as an empty one. Repository and environment-file paths come from the CI
//! environment unless overridden on the command line.

use crate::artefact::binary_type::BinaryType;
use crate::artefact::error::ArtefactError;
use crate::artefact::qualifiers::Qualifiers;
use crate::error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;

/// Environment variable naming the repository checkout.
pub const REPO_ROOT_VARIABLE: &str = "GITHUB_WORKSPACE";

/// Stage a built Node.js native addon under its versioned artefact name.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "addon-publisher")]
#[command(version, about)]
#[command(long_about = concat!(
    "Stage a built Node.js native addon under its versioned artefact name.\n\n",
    "Reads build/config.gypi and package.json from the repository root, picks the ",
    "first .node file in build/Release, and writes it to build/prepared as ",
    "v<version>-m<module>-n<napi>-<platform>-<libc>-<arch>.node, gzip-compressed ",
    "with a .gz suffix when BINARY_TYPE is application/gzip. The staged path is ",
    "appended to the environment file as binary_path=<path>.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Copy the addon for glibc Linux:\n",
    "    $ addon-publisher 8 linux glibc application/octet-stream\n\n",
    "  Compress the addon for musl Linux:\n",
    "    $ addon-publisher 8 linux musl application/gzip\n",
))]
pub struct Cli {
    /// Node-API version tag (e.g. "8").
    #[arg(value_name = "NAPI_VERSION")]
    pub napi_version: Option<String>,

    /// Target platform tag (e.g. "linux", "darwin", "win32").
    #[arg(value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// C library variant (e.g. "glibc", "musl").
    #[arg(value_name = "LIBC")]
    pub libc: Option<String>,

    /// Output MIME type; "application/gzip" compresses, anything else copies.
    #[arg(value_name = "BINARY_TYPE")]
    pub binary_type: Option<String>,

    /// Repository root containing build/ and package.json.
    #[arg(long, value_name = "DIR", env = "GITHUB_WORKSPACE")]
    pub repo_root: Option<Utf8PathBuf>,

    /// Environment file the staged path is appended to.
    #[arg(long, value_name = "FILE", env = "GITHUB_ENV")]
    pub env_file: Option<Utf8PathBuf>,

    /// Staging directory [default: <repo-root>/build/prepared].
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress the rename announcement and warnings (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Validated positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonArguments {
    /// Node-API version, platform, and libc.
    pub qualifiers: Qualifiers,
    /// Plain copy or gzip.
    pub binary_type: BinaryType,
}

impl Cli {
    /// Validate the four positional arguments in order.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::MissingArgument`] naming the first argument
    /// that is absent or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_publisher::artefact::binary_type::BinaryType;
    /// use addon_publisher::cli::Cli;
    /// use clap::Parser;
    ///
    /// let cli = Cli::parse_from(["addon-publisher", "8", "linux", "musl", "application/gzip"]);
    /// let args = cli.addon_arguments().expect("all arguments present");
    /// assert_eq!(args.binary_type, BinaryType::Gzip);
    /// ```
    pub fn addon_arguments(&self) -> std::result::Result<AddonArguments, ArtefactError> {
        let qualifiers = Qualifiers::from_args(
            self.napi_version.as_deref(),
            self.platform.as_deref(),
            self.libc.as_deref(),
        )?;
        let binary_type = BinaryType::try_from(self.binary_type.as_deref().unwrap_or_default())?;
        Ok(AddonArguments {
            qualifiers,
            binary_type,
        })
    }

    /// Return the repository root from `--repo-root` or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingEnvironment`] if neither is set.
    pub fn require_repo_root(&self) -> Result<&Utf8Path> {
        self.repo_root
            .as_deref()
            .ok_or(PublishError::MissingEnvironment {
                variable: REPO_ROOT_VARIABLE,
                flag: "--repo-root",
            })
    }

    /// Return the environment file from `--env-file` or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingEnvironment`] if neither is set.
    pub fn require_env_file(&self) -> Result<&Utf8Path> {
        self.env_file
            .as_deref()
            .ok_or(PublishError::MissingEnvironment {
                variable: crate::signal::ENV_FILE_VARIABLE,
                flag: "--env-file",
            })
    }

    /// Return the default log filter implied by `--quiet` and `-v`.
    ///
    /// `RUST_LOG`, when set, takes precedence over this value.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
