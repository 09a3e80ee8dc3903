//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while building an image from a generated Dockerfile
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Build started for a project folder
    Started { context_path: String, tag: String },

    /// Build context packed and ready to send
    ContextPacked { files: usize, bytes: usize },

    /// A line of build output from the daemon
    Output { line: String },

    /// A layer or pull status update
    Status { status: String, id: Option<String> },

    /// Build finished
    Completed { image_id: Option<String>, total_time: Duration },

    /// Build failed
    Failed { error: String },
}

/// Trait for handling progress events during a build
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
