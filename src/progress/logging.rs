//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { context_path, tag } => {
                info!(context = %context_path, tag = %tag, "Starting image build");
            }
            ProgressEvent::ContextPacked { files, bytes } => {
                debug!(files, bytes, "Build context packed");
            }
            ProgressEvent::Output { line } => {
                info!("{}", line);
            }
            ProgressEvent::Status { status, id } => match id {
                Some(id) => debug!(id = %id, "{}", status),
                None => debug!("{}", status),
            },
            ProgressEvent::Completed {
                image_id,
                total_time,
            } => {
                info!(
                    image = image_id.as_deref().unwrap_or("unknown"),
                    total_time_ms = total_time.as_millis(),
                    "Image build complete"
                );
            }
            ProgressEvent::Failed { error } => {
                error!(error = %error, "Image build failed");
            }
        }
    }
}
