//! End-to-end tests for the `addon-publisher` binary.
//!
//! Each case runs the compiled binary against a scratch repository with the
//! CI environment variables pointing into it, then checks the exit status,
//! the staged artefact, and the environment file.

use addon_publisher::test_utils::ScratchRepo;
use flate2::read::GzDecoder;
use rstest::{fixture, rstest};
use std::fs;
use std::io::Read;
use std::process::{Command, Output};

const PAYLOAD: &[u8] = b"\x7fELF native addon";

#[fixture]
fn repo() -> ScratchRepo {
    ScratchRepo::with_defaults().expect("scratch repo")
}

fn run_publisher(repo: &ScratchRepo, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_addon-publisher"))
        .args(args)
        .env("GITHUB_WORKSPACE", repo.root())
        .env("GITHUB_ENV", repo.env_file_path())
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn addon-publisher")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn plain_copy_succeeds(repo: ScratchRepo) {
    repo.add_release_file("ssh.node", PAYLOAD).expect("binary");

    let output = run_publisher(&repo, &["8", "linux", "glibc", "application/octet-stream"]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let staged = repo
        .layout()
        .prepared_dir()
        .join("v1.2.3-m115-n8-linux-glibc-x64.node");
    assert_eq!(fs::read(&staged).expect("staged artefact"), PAYLOAD);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ssh.node => v1.2.3-m115-n8-linux-glibc-x64.node\n"
    );
    let env = fs::read_to_string(repo.env_file_path()).expect("env file");
    assert_eq!(env, format!("binary_path={staged}\n"));
}

#[rstest]
fn gzip_output_decompresses_to_source(repo: ScratchRepo) {
    repo.add_release_file("ssh.node", PAYLOAD).expect("binary");

    let output = run_publisher(&repo, &["8", "linux", "musl", "application/gzip"]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let staged = repo
        .layout()
        .prepared_dir()
        .join("v1.2.3-m115-n8-linux-musl-x64.node.gz");
    let mut decoded = Vec::new();
    GzDecoder::new(fs::File::open(&staged).expect("open staged"))
        .read_to_end(&mut decoded)
        .expect("valid gzip");
    assert_eq!(decoded, PAYLOAD);
}

#[rstest]
fn appends_to_existing_env_file(repo: ScratchRepo) {
    repo.add_release_file("ssh.node", PAYLOAD).expect("binary");
    fs::write(repo.env_file_path(), "EXISTING=1\n").expect("seed env file");

    let output = run_publisher(&repo, &["-q", "8", "linux", "glibc", "application/gzip"]);

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(output.stdout.is_empty());
    let env = fs::read_to_string(repo.env_file_path()).expect("env file");
    let lines: Vec<&str> = env.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines.first().copied(), Some("EXISTING=1"));
    assert!(
        lines
            .get(1)
            .is_some_and(|line| line.starts_with("binary_path=") && line.ends_with(".node.gz"))
    );
}

#[rstest]
#[case::no_arguments(&[], "missing node API argument")]
#[case::no_platform(&["8"], "missing platform argument")]
#[case::empty_libc(&["8", "linux", "", "application/gzip"], "missing libc argument")]
#[case::no_binary_type(&["8", "linux", "glibc"], "missing binary type argument")]
fn missing_arguments_fail_without_side_effects(
    repo: ScratchRepo,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    repo.add_release_file("ssh.node", PAYLOAD).expect("binary");

    let output = run_publisher(&repo, args);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains(message), "stderr: {}", stderr_text(&output));
    assert!(!repo.env_file_path().exists());
    assert!(!repo.layout().prepared_dir().exists());
}

#[rstest]
fn missing_release_binary_fails(repo: ScratchRepo) {
    let output = run_publisher(&repo, &["8", "linux", "glibc", "application/gzip"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr_text(&output).contains("did not find any release .node files"),
        "stderr: {}",
        stderr_text(&output)
    );
    assert!(!repo.env_file_path().exists());
}

#[rstest]
fn unset_env_file_variable_fails(repo: ScratchRepo) {
    repo.add_release_file("ssh.node", PAYLOAD).expect("binary");

    let output = Command::new(env!("CARGO_BIN_EXE_addon-publisher"))
        .args(["8", "linux", "glibc", "application/gzip"])
        .env("GITHUB_WORKSPACE", repo.root())
        .env_remove("GITHUB_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn addon-publisher");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains("GITHUB_ENV"));
    assert!(!repo.layout().prepared_dir().exists());
}
