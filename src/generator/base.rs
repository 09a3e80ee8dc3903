//! Fixed Dockerfile assembly
//!
//! [`Generator`] runs the stages in a fixed order and asks its [`Hooks`] for
//! the content of each one. Stages with nothing to say are left out. The
//! privilege drop always sits between the apt stages (which need root) and
//! the language-level install (which must not run as root).

use super::hooks::{HookContext, Hooks};
use super::instructions;
use super::tables::MANAGED_DOCKERFILE;
use super::GenerateError;
use crate::environment::Environment;
use crate::fs::ProjectFolder;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Identification written into the optional header comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub tool_name: String,
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
}

impl HeaderInfo {
    pub fn new(
        tool_name: impl Into<String>,
        tool_version: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            generated_at,
        }
    }
}

impl Default for HeaderInfo {
    /// This crate's name and version, stamped now
    fn default() -> Self {
        Self::new(crate::TOOL_NAME, crate::VERSION, Utc::now())
    }
}

pub struct Generator<'a> {
    hooks: Box<dyn Hooks + 'a>,
    environment: &'a Environment,
    folder: ProjectFolder,
    header: HeaderInfo,
}

impl<'a> Generator<'a> {
    pub fn new(hooks: impl Hooks + 'a, environment: &'a Environment, folder: ProjectFolder) -> Self {
        Self::with_header(hooks, environment, folder, HeaderInfo::default())
    }

    pub fn with_header(
        hooks: impl Hooks + 'a,
        environment: &'a Environment,
        folder: ProjectFolder,
        header: HeaderInfo,
    ) -> Self {
        Self {
            hooks: Box::new(hooks),
            environment,
            folder,
            header,
        }
    }

    pub fn folder(&self) -> &ProjectFolder {
        &self.folder
    }

    /// Gives the bound folder back, e.g. to use it as a build context
    pub fn into_folder(self) -> ProjectFolder {
        self.folder
    }

    pub fn hooks(&self) -> &dyn Hooks {
        self.hooks.as_ref()
    }

    fn context(&self) -> HookContext<'_> {
        HookContext {
            environment: self.environment,
            folder: &self.folder,
        }
    }

    /// Assembles the Dockerfile, writes it to the managed file in the bound
    /// folder and returns it. Nothing is written if a hook fails.
    pub fn generate(&self, include_header: bool) -> Result<String, GenerateError> {
        let ctx = self.context();
        let hooks = self.hooks.as_ref();
        let mut dockerfile = String::new();

        if include_header {
            dockerfile.push_str(&instructions::header(
                &self.header.tool_name,
                &self.header.tool_version,
                &self.header.generated_at,
            ));
        }

        dockerfile.push_str(&instructions::from(
            &hooks.base_name(&ctx),
            &hooks.base_version(&ctx),
        ));

        if hooks.applies(&ctx) {
            dockerfile.push_str(&self.stages(&ctx)?);
        } else {
            debug!(
                generator = hooks.name(),
                "Ecosystem not present, emitting base image only"
            );
        }

        self.folder.write(MANAGED_DOCKERFILE, &dockerfile)?;
        info!(
            generator = hooks.name(),
            path = %self.folder.path().join(MANAGED_DOCKERFILE).display(),
            "Generated Dockerfile"
        );

        Ok(dockerfile)
    }

    fn stages(&self, ctx: &HookContext<'_>) -> Result<String, GenerateError> {
        let hooks = self.hooks.as_ref();
        let mut text = String::new();

        let env_vars = hooks.env_vars(ctx);
        if !env_vars.is_empty() {
            text.push_str(&instructions::env(&env_vars));
        }

        let repos = hooks.apt_repos(ctx);
        if !repos.is_empty() {
            text.push_str(&instructions::repository_tools());
            for repo in &repos {
                text.push_str(&instructions::repository(repo));
            }
        }

        let packages = hooks.apt_packages(ctx);
        if !packages.is_empty() {
            text.push_str(&instructions::apt_packages(&packages));
        }

        text.push_str(&instructions::drop_privileges());

        let install_files = hooks.install_files(ctx)?;
        let install_command = hooks.install_command(ctx)?;
        text.push_str(&instructions::install(
            &install_files,
            install_command.as_deref(),
        ));

        let project_files = hooks.project_files(ctx);
        if !project_files.is_empty() {
            text.push_str(&instructions::project_files(&project_files));
        }

        if let Some(command) = hooks.run_command(ctx) {
            text.push_str(&instructions::cmd(&command));
        }

        debug!(
            generator = hooks.name(),
            env_vars = env_vars.len(),
            repos = repos.len(),
            packages = packages.len(),
            install_files = install_files.len(),
            project_files = project_files.len(),
            "Assembled stages"
        );

        Ok(text)
    }
}
