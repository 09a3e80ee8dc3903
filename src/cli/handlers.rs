//! Command handlers
//!
//! Each handler returns the process exit code. Failures are logged here so
//! `main` only has to exit with the code.

use super::commands::{BuildArgs, CompileArgs, ProjectArgs};
use crate::builder::{default_tag, ImageBuilder};
use crate::config::DockterConfig;
use crate::environment::{Environment, RuntimePlatform};
use crate::fs::ProjectFolder;
use crate::generator::{Ecosystem, Generator, HeaderInfo};
use crate::progress::{LoggingHandler, NoOpHandler, ProgressHandler};
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

pub fn handle_compile(args: &CompileArgs, quiet: bool) -> i32 {
    match compile(args, quiet) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub async fn handle_build(args: &BuildArgs, quiet: bool) -> i32 {
    match build(args, quiet).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn compile(args: &CompileArgs, quiet: bool) -> Result<()> {
    let mut config = DockterConfig::default();
    if args.no_header {
        config.include_header = false;
    }
    let project = Project::load(&args.project, config)?;

    let generator = project.generator();
    let dockerfile = generator
        .generate(project.config.include_header)
        .context("Failed to generate Dockerfile")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &dockerfile)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Dockerfile written");
            if !quiet {
                println!("Dockerfile written to {}", path.display());
            }
        }
        None => print!("{}", dockerfile),
    }

    Ok(())
}

async fn build(args: &BuildArgs, quiet: bool) -> Result<()> {
    let mut config = DockterConfig::default();
    if let Some(timeout) = args.timeout {
        config.build_timeout_secs = timeout;
    }
    let project = Project::load(&args.project, config)?;

    let generator = project.generator();
    generator
        .generate(project.config.include_header)
        .context("Failed to generate Dockerfile")?;
    let folder = generator.into_folder();

    let tag = args
        .tag
        .clone()
        .or_else(|| project.config.image_tag.clone())
        .unwrap_or_else(|| default_tag(folder.path()));
    debug!(tag = %tag, "Resolved image tag");

    let builder = ImageBuilder::connect(project.config.build_timeout())
        .context("Failed to create Docker client")?;
    if !builder.is_available().await {
        bail!("Docker daemon is not available. Is Docker running?");
    }

    let handler: &dyn ProgressHandler = if quiet { &NoOpHandler } else { &LoggingHandler };
    let image_id = builder
        .build(&folder, &tag, handler)
        .await
        .with_context(|| format!("Failed to build image {}", tag))?;

    if !quiet {
        match image_id {
            Some(id) => println!("Built {} ({})", tag, id),
            None => println!("Built {}", tag),
        }
    }

    Ok(())
}

/// Everything a command needs before generating
struct Project {
    config: DockterConfig,
    environment: Environment,
    root: PathBuf,
    ecosystem: Ecosystem,
}

impl Project {
    fn load(args: &ProjectArgs, mut config: DockterConfig) -> Result<Self> {
        if let Some(version) = args.python_version {
            config.python_version = version;
        }
        config.validate().context("Invalid configuration")?;
        let python = config.python_version()?;

        let root = resolve_folder(args.folder.clone())?;
        debug!(folder = %root.display(), "Project folder");

        let environment = match &args.environ {
            Some(path) => Environment::load(path)?,
            None => Environment::empty(),
        };

        let folder = ProjectFolder::new(&root);
        let ecosystem = match &args.platform {
            Some(name) => {
                let platform = RuntimePlatform::from_name(name).unwrap_or_else(|| {
                    warn!(
                        platform = %name,
                        "No generator for platform, only the base image will be emitted"
                    );
                    RuntimePlatform::from_tag(name)
                });
                Ecosystem::for_platform(&platform, python)
            }
            None => Ecosystem::detect(&environment, &folder, python),
        };
        info!(ecosystem = %ecosystem, folder = %root.display(), "Generating Dockerfile");

        Ok(Self {
            config,
            environment,
            root,
            ecosystem,
        })
    }

    fn generator(&self) -> Generator<'_> {
        self.ecosystem.generator(
            &self.environment,
            ProjectFolder::new(&self.root),
            HeaderInfo::default(),
        )
    }
}

fn resolve_folder(folder: Option<PathBuf>) -> Result<PathBuf> {
    let folder = match folder {
        Some(folder) => folder,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !folder.exists() {
        bail!("Project folder does not exist: {}", folder.display());
    }
    if !folder.is_dir() {
        bail!("Project folder is not a directory: {}", folder.display());
    }

    folder
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", folder.display()))
}
