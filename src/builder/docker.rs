use super::context;
use super::BuildError;
use crate::fs::ProjectFolder;
use crate::generator::MANAGED_DOCKERFILE;
use crate::progress::{ProgressEvent, ProgressHandler};
use bollard::image::BuildImageOptions;
use bollard::Docker;
use bytes::Bytes;
use futures_util::stream::StreamExt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Drives image builds on the local Docker daemon
pub struct ImageBuilder {
    docker: Docker,
    timeout: Duration,
}

impl ImageBuilder {
    /// Connects using the platform defaults (`DOCKER_HOST` or the local socket)
    pub fn connect(timeout: Duration) -> Result<Self, BuildError> {
        let docker = Docker::connect_with_local_defaults().map_err(BuildError::Connection)?;
        Ok(Self { docker, timeout })
    }

    /// Whether the daemon answers
    pub async fn is_available(&self) -> bool {
        match self.docker.version().await {
            Ok(v) => {
                debug!(
                    api_version = v.api_version.as_deref().unwrap_or("unknown"),
                    "Docker daemon available"
                );
                true
            }
            Err(e) => {
                debug!("Failed to get Docker version: {}", e);
                false
            }
        }
    }

    /// Builds the managed Dockerfile in `folder`, using the folder as build
    /// context. Returns the image id reported by the daemon, if any.
    pub async fn build(
        &self,
        folder: &ProjectFolder,
        tag: &str,
        progress: &dyn ProgressHandler,
    ) -> Result<Option<String>, BuildError> {
        let start = Instant::now();

        if !folder.exists(MANAGED_DOCKERFILE) {
            return Err(BuildError::MissingDockerfile(
                folder.path().join(MANAGED_DOCKERFILE),
            ));
        }

        progress.on_progress(&ProgressEvent::Started {
            context_path: folder.path().display().to_string(),
            tag: tag.to_string(),
        });

        let result = match tokio::time::timeout(self.timeout, self.run(folder, tag, progress)).await
        {
            Ok(result) => result,
            Err(_) => Err(BuildError::Timeout(self.timeout.as_secs())),
        };

        match &result {
            Ok(image_id) => progress.on_progress(&ProgressEvent::Completed {
                image_id: image_id.clone(),
                total_time: start.elapsed(),
            }),
            Err(e) => progress.on_progress(&ProgressEvent::Failed {
                error: e.to_string(),
            }),
        }

        result
    }

    async fn run(
        &self,
        folder: &ProjectFolder,
        tag: &str,
        progress: &dyn ProgressHandler,
    ) -> Result<Option<String>, BuildError> {
        let root = folder.path().to_path_buf();
        let packed = tokio::task::spawn_blocking(move || context::pack(&root))
            .await
            .map_err(|e| BuildError::Context {
                path: folder.path().to_path_buf(),
                message: e.to_string(),
            })??;

        progress.on_progress(&ProgressEvent::ContextPacked {
            files: packed.files,
            bytes: packed.archive.len(),
        });

        let options = BuildImageOptions {
            dockerfile: MANAGED_DOCKERFILE.to_string(),
            t: tag.to_string(),
            rm: true,
            ..Default::default()
        };

        let mut stream = self
            .docker
            .build_image(options, None, Some(Bytes::from(packed.archive)));

        let mut image_id = None;
        while let Some(item) = stream.next().await {
            let info = item.map_err(BuildError::Api)?;

            if let Some(error) = info.error {
                return Err(BuildError::Daemon(error));
            }
            if let Some(line) = info.stream {
                let line = line.trim_end();
                if !line.is_empty() {
                    progress.on_progress(&ProgressEvent::Output {
                        line: line.to_string(),
                    });
                }
            }
            if let Some(status) = info.status {
                progress.on_progress(&ProgressEvent::Status {
                    status,
                    id: info.id,
                });
            }
            if let Some(id) = info.aux.and_then(|aux| aux.id) {
                image_id = Some(id);
            }
        }

        Ok(image_id)
    }
}
