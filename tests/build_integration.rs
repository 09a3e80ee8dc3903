//! Image build driver tests
//!
//! Tests marked `#[ignore]` need a running Docker daemon:
//! `cargo test --test build_integration -- --ignored`

use dockter::builder::{collect_files, pack, BuildError, ImageBuilder};
use dockter::environment::{Environment, PackageRequirement, RuntimePlatform};
use dockter::fs::ProjectFolder;
use dockter::generator::{DebHooks, Generator, PythonHooks};
use dockter::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingHandler {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressHandler for RecordingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn test_build_requires_generated_dockerfile() {
    let dir = TempDir::new().unwrap();
    let folder = ProjectFolder::new(dir.path());
    let builder = ImageBuilder::connect(Duration::from_secs(5)).unwrap();

    let err = builder
        .build(&folder, "dockter-test", &NoOpHandler)
        .await
        .unwrap_err();

    match err {
        BuildError::MissingDockerfile(path) => assert!(path.ends_with(".Dockerfile")),
        other => panic!("Expected MissingDockerfile, got {:?}", other),
    }
}

#[test]
fn test_generated_files_are_packed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".dockerignore"), "*.csv\n").unwrap();
    fs::write(dir.path().join("data.csv"), "1,2").unwrap();
    let environment = Environment::new(vec![
        PackageRequirement::new("curl", "", RuntimePlatform::Deb).into(),
    ]);
    Generator::new(DebHooks, &environment, ProjectFolder::new(dir.path()))
        .generate(false)
        .unwrap();

    let context = pack(dir.path()).unwrap();

    // .Dockerfile and .dockerignore
    assert_eq!(context.files, 2);
}

#[test]
fn test_gitignored_generated_files_are_packed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".gitignore"), ".Dockerfile\n.requirements.txt\n").unwrap();
    fs::write(dir.path().join(".dockerignore"), ".requirements.txt\n").unwrap();
    let environment = Environment::new(vec![
        PackageRequirement::new("arrow", "==0.12.1", RuntimePlatform::Python).into(),
    ]);
    Generator::new(PythonHooks::default(), &environment, ProjectFolder::new(dir.path()))
        .generate(false)
        .unwrap();

    let files = collect_files(dir.path()).unwrap();
    assert!(files.contains(&PathBuf::from(".Dockerfile")));

    let context = pack(dir.path()).unwrap();
    let mut archive = tar::Archive::new(context.archive.as_slice());
    let entries: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|entry| entry.unwrap().path().unwrap().display().to_string())
        .collect();
    assert_eq!(
        entries,
        vec![".Dockerfile", ".dockerignore", ".gitignore", ".requirements.txt"]
    );
}

#[tokio::test]
#[ignore]
async fn test_build_image_on_daemon() {
    let dir = TempDir::new().unwrap();
    let environment = Environment::new(vec![
        PackageRequirement::new("curl", "", RuntimePlatform::Deb).into(),
    ]);
    let generator = Generator::new(DebHooks, &environment, ProjectFolder::new(dir.path()));
    generator.generate(true).unwrap();
    let folder = generator.into_folder();

    let builder = ImageBuilder::connect(Duration::from_secs(600)).unwrap();
    if !builder.is_available().await {
        eprintln!("Docker daemon not available, skipping");
        return;
    }

    let handler = RecordingHandler::default();
    builder
        .build(&folder, "dockter-integration:test", &handler)
        .await
        .unwrap();

    let events = handler.events.lock().unwrap();
    assert!(matches!(events.first(), Some(ProgressEvent::Started { .. })));
    assert!(matches!(events.last(), Some(ProgressEvent::Completed { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, ProgressEvent::ContextPacked { files: 1, .. })));
}
