//! dockter - Dockerfile generation from declared project requirements
//!
//! Given an [`Environment`] (the requirements detected for a project, each
//! tagged with the runtime platform it belongs to) and a project folder,
//! dockter writes a reproducible Dockerfile and any package manifests it
//! needs, and can build the image on the local Docker daemon.
//!
//! # Core Concepts
//!
//! - **Generator**: runs the fixed Dockerfile stages (base image, environment,
//!   apt repositories and packages, privilege drop, install, project files,
//!   command) and writes the result to `.Dockerfile`
//! - **Hooks**: per-ecosystem policy deciding what goes into each stage
//! - **Ecosystem**: one case per supported runtime (Debian packages, Python)
//!
//! # Example Usage
//!
//! ```no_run
//! use dockter::{Ecosystem, Environment, HeaderInfo, ProjectFolder, PythonVersion};
//!
//! let environment = Environment::load("environ.json".as_ref()).unwrap();
//! let folder = ProjectFolder::new("/path/to/project");
//!
//! let dockerfile = Ecosystem::detect(&environment, &folder, PythonVersion::Three)
//!     .generator(&environment, folder, HeaderInfo::default())
//!     .generate(true)
//!     .unwrap();
//! print!("{}", dockerfile);
//! ```
//!
//! # Project Structure
//!
//! - [`environment`]: requirement data model and environment files
//! - [`generator`]: Dockerfile assembly and ecosystem hooks
//! - [`builder`]: image builds on the Docker daemon
//! - [`fs`]: the project folder generators read from and write to

pub mod builder;
pub mod cli;
pub mod config;
pub mod environment;
pub mod fs;
pub mod generator;
pub mod progress;
pub mod util;

pub use builder::{BuildError, ImageBuilder};
pub use config::{ConfigError, DockterConfig};
pub use environment::{
    Environment, EnvironmentError, OtherRequirement, PackageRequirement, Requirement,
    RuntimePlatform,
};
pub use fs::{FolderError, ProjectFolder};
pub use generator::{
    DebHooks, Ecosystem, GenerateError, Generator, HeaderInfo, Hooks, PythonHooks, PythonVersion,
};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Name written into generated Dockerfile headers
pub const TOOL_NAME: &str = "Dockter";
