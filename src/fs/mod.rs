//! Scoped file access for generators

mod folder;

pub use folder::{FolderError, ProjectFolder};
