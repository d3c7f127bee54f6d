//! Addon publisher CLI entrypoint.
//!
//! Stages the freshly built native addon under its versioned artefact name
//! and records the staged path in the CI environment file. Every failure is
//! reported as a single `error:` line on stderr followed by exit status 1.

use addon_publisher::cli::Cli;
use addon_publisher::error::Result;
use addon_publisher::layout::{RepoLayout, absolute};
use addon_publisher::pipeline::{self, PublishOutcome, PublishRequest};
use addon_publisher::signal::EnvFile;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_filter());
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides `default_filter`.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        // A subscriber is already installed; keep it.
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<PublishOutcome> {
    // Step 1: Validate positional arguments before touching the filesystem
    let arguments = cli.addon_arguments()?;

    // Step 2: Resolve repository and environment-file paths
    let layout = RepoLayout::resolve(cli.require_repo_root()?)?;
    let recorder = EnvFile::new(cli.require_env_file()?.to_owned());
    let mut request = PublishRequest::new(layout, arguments.qualifiers, arguments.binary_type);
    if let Some(out_dir) = cli.out_dir.as_deref() {
        request = request.with_out_dir(absolute(out_dir)?);
    }

    // Step 3: Read build metadata and locate the release binary
    let plan = pipeline::plan(&request)?;
    if !cli.quiet {
        write_line(stdout, plan.announcement());
    }

    // Step 4: Stage and record
    pipeline::execute(&plan, &recorder)
}

fn exit_code_for_run_result(result: Result<PublishOutcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_line(sink: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(sink, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
