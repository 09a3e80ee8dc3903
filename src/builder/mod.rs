//! Image builds from generated Dockerfiles
//!
//! Consumes the managed Dockerfile a generator wrote and builds it on the
//! local Docker daemon, streaming progress to a
//! [`ProgressHandler`](crate::progress::ProgressHandler).

mod context;
mod docker;

pub use context::{collect_files, pack, required_files, BuildContext, DOCKER_IGNORE_FILE};
pub use docker::ImageBuilder;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to connect to Docker: {0}")]
    Connection(#[source] bollard::errors::Error),
    #[error("Managed Dockerfile not found: {0}. Run compile first")]
    MissingDockerfile(PathBuf),
    #[error("Failed to pack build context at {path}: {message}")]
    Context { path: PathBuf, message: String },
    #[error("Docker API error: {0}")]
    Api(#[source] bollard::errors::Error),
    #[error("Build failed: {0}")]
    Daemon(String),
    #[error("Build timed out after {0} seconds")]
    Timeout(u64),
}

/// Image tag derived from the project folder name
pub fn default_tag(folder: &Path) -> String {
    let name: String = folder
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let name = name.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if name.is_empty() {
        "dockter-project".to_string()
    } else {
        name.to_string()
    }
}
