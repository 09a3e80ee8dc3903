//! Build context packing
//!
//! The bound project folder is sent to the daemon as a tar archive. Hidden
//! files are included because the managed Dockerfile and generated manifests
//! are hidden. Only `.dockerignore` rules apply, as with `docker build`, and
//! they never drop the managed Dockerfile or a file it copies in.

use super::BuildError;
use crate::generator::MANAGED_DOCKERFILE;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tar::{Builder, HeaderMode};
use tracing::{debug, trace};

pub const DOCKER_IGNORE_FILE: &str = ".dockerignore";

#[derive(Debug)]
pub struct BuildContext {
    pub archive: Vec<u8>,
    pub files: usize,
}

fn context_error(path: &Path, source: impl std::fmt::Display) -> BuildError {
    BuildError::Context {
        path: path.to_path_buf(),
        message: source.to_string(),
    }
}

/// Relative paths of every file that goes into the context, sorted
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .add_custom_ignore_filename(DOCKER_IGNORE_FILE)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| context_error(root, e))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| context_error(entry.path(), e))?
            .to_path_buf();
        trace!(path = %relative.display(), "Adding to build context");
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

/// The managed Dockerfile and every regular file its `COPY` lines take from
/// the folder. Empty when no Dockerfile has been generated.
pub fn required_files(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let dockerfile_path = root.join(MANAGED_DOCKERFILE);
    if !dockerfile_path.is_file() {
        return Ok(Vec::new());
    }
    let dockerfile =
        fs::read_to_string(&dockerfile_path).map_err(|e| context_error(&dockerfile_path, e))?;

    let mut required = vec![PathBuf::from(MANAGED_DOCKERFILE)];
    for line in dockerfile.lines() {
        let mut words = line.split_whitespace();
        if words.next() != Some("COPY") {
            continue;
        }
        let Some(source) = words.next().map(PathBuf::from) else {
            continue;
        };
        let plain = source
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if plain && root.join(&source).is_file() && !required.contains(&source) {
            required.push(source);
        }
    }

    Ok(required)
}

/// Packs `root` into a tar archive with normalized metadata, so the same
/// folder always produces the same archive
pub fn pack(root: &Path) -> Result<BuildContext, BuildError> {
    let mut files = collect_files(root)?;
    for required in required_files(root)? {
        if !files.contains(&required) {
            debug!(path = %required.display(), "Keeping ignored file needed by the Dockerfile");
            files.push(required);
        }
    }
    files.sort();

    let mut builder = Builder::new(Vec::new());
    builder.mode(HeaderMode::Deterministic);
    for relative in &files {
        builder
            .append_path_with_name(root.join(relative), relative)
            .map_err(|e| context_error(&root.join(relative), e))?;
    }

    let archive = builder.into_inner().map_err(|e| context_error(root, e))?;
    debug!(
        root = %root.display(),
        files = files.len(),
        bytes = archive.len(),
        "Packed build context"
    );

    Ok(BuildContext {
        archive,
        files: files.len(),
    })
}
