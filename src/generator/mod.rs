//! Dockerfile generation
//!
//! The base [`Generator`] owns the stage order; ecosystems plug in through
//! [`Hooks`]. Pick an ecosystem with [`Ecosystem::detect`] or
//! [`Ecosystem::for_platform`] and call [`Generator::generate`]:
//!
//! ```no_run
//! use dockter::environment::{Environment, PackageRequirement, RuntimePlatform};
//! use dockter::fs::ProjectFolder;
//! use dockter::generator::{Ecosystem, HeaderInfo, PythonVersion};
//!
//! let env = Environment::new(vec![
//!     PackageRequirement::new("arrow", "==0.12.1", RuntimePlatform::Python).into(),
//! ]);
//! let folder = ProjectFolder::new("/path/to/project");
//! let generator = Ecosystem::detect(&env, &folder, PythonVersion::default())
//!     .generator(&env, folder, HeaderInfo::default());
//! let dockerfile = generator.generate(true).unwrap();
//! println!("{}", dockerfile);
//! ```

mod base;
mod deb;
mod ecosystem;
mod hooks;
mod instructions;
mod python;
mod tables;

pub use base::{Generator, HeaderInfo};
pub use deb::DebHooks;
pub use ecosystem::Ecosystem;
pub use hooks::{AptRepo, BaseHooks, CopySpec, HookContext, Hooks};
pub use python::{PythonHooks, GENERATED_REQUIREMENTS_FILE, MAIN_SCRIPT, REQUIREMENTS_FILE};
pub use tables::{
    PythonVersion, DEFAULT_BASE_NAME, DEFAULT_BASE_VERSION, MANAGED_DOCKERFILE, MANAGED_MARKER,
    USER_ID, USER_NAME,
};

use crate::fs::FolderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Folder(#[from] FolderError),
}
