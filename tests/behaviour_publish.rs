//! Behaviour-driven tests for the publish pipeline.
//!
//! These scenarios drive `pipeline::publish` against scratch addon
//! repositories and check the staged artefact and environment file. Tests use
//! the rstest-bdd v0.5.0 mutable world pattern.

use addon_publisher::artefact::binary_type::BinaryType;
use addon_publisher::artefact::qualifiers::Qualifiers;
use addon_publisher::error::PublishError;
use addon_publisher::pipeline::{PublishOutcome, PublishRequest, publish};
use addon_publisher::scanner::is_addon_filename;
use addon_publisher::signal::EnvFile;
use addon_publisher::test_utils::ScratchRepo;
use camino::Utf8PathBuf;
use flate2::read::GzDecoder;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use std::io::Read;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PublishWorld {
    repo: Option<ScratchRepo>,
    sources: Vec<Utf8PathBuf>,
    outcome: Option<PublishOutcome>,
    error: Option<PublishError>,
}

#[fixture]
fn world() -> PublishWorld {
    PublishWorld::default()
}

fn repo(world: &PublishWorld) -> &ScratchRepo {
    world.repo.as_ref().expect("repository set")
}

fn outcome(world: &PublishWorld) -> &PublishOutcome {
    world.outcome.as_ref().expect("publish succeeded")
}

fn binary_contents(name: &str) -> Vec<u8> {
    format!("\x7fELF contents of {name}").into_bytes()
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a built addon repository at version \"{version}\"")]
fn given_repository(world: &mut PublishWorld, version: String) {
    let scratch = ScratchRepo::with_defaults().expect("scratch repo");
    scratch
        .write_package_manifest(&version)
        .expect("write package.json");
    world.repo = Some(scratch);
}

#[given("a release binary \"{name}\"")]
fn given_release_binary(world: &mut PublishWorld, name: String) {
    let path = repo(world)
        .add_release_file(&name, &binary_contents(&name))
        .expect("write binary");
    world.sources.push(path);
}

#[when("the addon is published as \"{mime}\"")]
fn when_published(world: &mut PublishWorld, mime: String) {
    let scratch = repo(world);
    let qualifiers =
        Qualifiers::from_args(Some("8"), Some("linux"), Some("glibc")).expect("qualifiers");
    let binary_type = BinaryType::try_from(mime.as_str()).expect("binary type");
    let request = PublishRequest::new(scratch.layout(), qualifiers, binary_type);
    let env_file = EnvFile::new(scratch.env_file_path());

    match publish(&request, &env_file) {
        Ok(result) => world.outcome = Some(result),
        Err(e) => world.error = Some(e),
    }
}

#[then("the staged file is named \"{expected}\"")]
fn then_staged_name(world: &mut PublishWorld, expected: String) {
    let staged = &outcome(world).artefact_path;
    assert_eq!(staged.file_name(), Some(expected.as_str()));
    assert_eq!(staged.parent(), Some(repo(world).layout().prepared_dir().as_path()));
}

#[then("the staged file matches the release binary")]
fn then_staged_matches(world: &mut PublishWorld) {
    let source = world.sources.first().expect("one source");
    let staged = fs::read(&outcome(world).artefact_path).expect("read staged");
    assert_eq!(staged, fs::read(source).expect("read source"));
}

#[then("the staged file decompresses to the release binary")]
fn then_staged_decompresses(world: &mut PublishWorld) {
    let source = world.sources.first().expect("one source");
    let file = fs::File::open(&outcome(world).artefact_path).expect("open staged");
    let mut decoded = Vec::new();
    GzDecoder::new(file)
        .read_to_end(&mut decoded)
        .expect("valid gzip stream");
    assert_eq!(decoded, fs::read(source).expect("read source"));
}

#[then("the environment file records the staged path")]
fn then_env_file_records(world: &mut PublishWorld) {
    let contents = fs::read_to_string(repo(world).env_file_path()).expect("read env file");
    assert_eq!(
        contents,
        format!("binary_path={}\n", outcome(world).artefact_path)
    );
}

#[then("publishing fails with no release binaries")]
fn then_no_release_binaries(world: &mut PublishWorld) {
    assert!(world.outcome.is_none(), "publish should not succeed");
    assert!(
        matches!(world.error, Some(PublishError::NoReleaseBinaries { .. })),
        "expected NoReleaseBinaries, got {:?}",
        world.error
    );
}

#[then("the environment file is untouched")]
fn then_env_file_untouched(world: &mut PublishWorld) {
    assert!(!repo(world).env_file_path().exists());
}

#[then("nothing is staged")]
fn then_nothing_staged(world: &mut PublishWorld) {
    assert!(!repo(world).layout().prepared_dir().exists());
}

#[then("exactly one file is staged")]
fn then_one_staged(world: &mut PublishWorld) {
    let count = fs::read_dir(repo(world).layout().prepared_dir())
        .expect("list staging dir")
        .count();
    assert_eq!(count, 1);
}

#[then("the staged file matches the first listed binary")]
fn then_matches_first_listed(world: &mut PublishWorld) {
    let first = fs::read_dir(repo(world).layout().release_dir())
        .expect("list release dir")
        .map(|entry| entry.expect("entry").file_name())
        .filter_map(|name| name.into_string().ok())
        .find(|name| is_addon_filename(name))
        .expect("a listed binary");
    let staged = fs::read(&outcome(world).artefact_path).expect("read staged");
    assert_eq!(staged, binary_contents(&first));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/publish.feature",
    name = "Copy the release binary under its versioned name"
)]
fn scenario_copy(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Compress the release binary"
)]
fn scenario_compress(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Fail when no release binary exists"
)]
fn scenario_no_binary(world: PublishWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/publish.feature",
    name = "Only the first listed binary is staged"
)]
fn scenario_first_match(world: PublishWorld) {
    let _ = world;
}
