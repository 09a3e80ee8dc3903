//! Extension points of the Dockerfile assembly
//!
//! [`Hooks`] is implemented once per ecosystem. Every method has a default
//! that matches the plain base generator, so an ecosystem only overrides what
//! it actually needs. Hooks must be total: for any environment they return an
//! empty or absent value rather than failing. The two hooks that may touch the
//! disk return `Result` so I/O failures reach the caller untouched.

use super::tables::{DEFAULT_BASE_NAME, DEFAULT_BASE_VERSION};
use super::GenerateError;
use crate::environment::{Environment, RuntimePlatform};
use crate::fs::ProjectFolder;
use serde::{Deserialize, Serialize};

/// What a hook gets to look at
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub environment: &'a Environment,
    pub folder: &'a ProjectFolder,
}

/// A `COPY <from> <to>` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopySpec {
    pub from: String,
    pub to: String,
}

impl CopySpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Copies a path to the same relative location in the image
    pub fn same(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            from: path.clone(),
            to: path,
        }
    }
}

/// A third-party apt repository and the id of its signing key, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptRepo {
    pub repository: String,
    pub key_id: Option<String>,
}

impl AptRepo {
    pub fn new(repository: impl Into<String>, key_id: Option<&str>) -> Self {
        Self {
            repository: repository.into(),
            key_id: key_id.map(str::to_string),
        }
    }
}

pub trait Hooks: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Platform tag whose requirements this generator consumes
    fn applies_runtime(&self) -> Option<RuntimePlatform> {
        None
    }

    /// Whether this ecosystem is present at all. When false only the
    /// `FROM` line is generated.
    fn applies(&self, ctx: &HookContext<'_>) -> bool {
        self.applies_runtime()
            .map(|platform| ctx.environment.has_platform(&platform))
            .unwrap_or(false)
    }

    fn base_name(&self, _ctx: &HookContext<'_>) -> String {
        DEFAULT_BASE_NAME.to_string()
    }

    /// Image tag; empty means no tag
    fn base_version(&self, _ctx: &HookContext<'_>) -> String {
        DEFAULT_BASE_VERSION.to_string()
    }

    fn env_vars(&self, _ctx: &HookContext<'_>) -> Vec<(String, String)> {
        Vec::new()
    }

    fn apt_repos(&self, _ctx: &HookContext<'_>) -> Vec<AptRepo> {
        Vec::new()
    }

    fn apt_packages(&self, _ctx: &HookContext<'_>) -> Vec<String> {
        Vec::new()
    }

    /// Files copied in before the install command runs
    fn install_files(&self, _ctx: &HookContext<'_>) -> Result<Vec<CopySpec>, GenerateError> {
        Ok(Vec::new())
    }

    fn install_command(&self, _ctx: &HookContext<'_>) -> Result<Option<String>, GenerateError> {
        Ok(None)
    }

    /// Project sources copied in after installation
    fn project_files(&self, _ctx: &HookContext<'_>) -> Vec<CopySpec> {
        Vec::new()
    }

    fn run_command(&self, _ctx: &HookContext<'_>) -> Option<String> {
        None
    }
}

/// The base generator: no ecosystem, every hook at its default
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseHooks;

impl Hooks for BaseHooks {
    fn name(&self) -> &str {
        "base"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::PackageRequirement;

    #[test]
    fn test_base_hooks_defaults() {
        let env = Environment::new(vec![PackageRequirement::new(
            "arrow",
            "",
            RuntimePlatform::Python,
        )
        .into()]);
        let folder = ProjectFolder::temporary().unwrap();
        let ctx = HookContext {
            environment: &env,
            folder: &folder,
        };

        let hooks = BaseHooks;
        assert!(!hooks.applies(&ctx));
        assert_eq!(hooks.base_name(&ctx), "ubuntu");
        assert_eq!(hooks.base_version(&ctx), "18.04");
        assert!(hooks.env_vars(&ctx).is_empty());
        assert!(hooks.apt_repos(&ctx).is_empty());
        assert!(hooks.apt_packages(&ctx).is_empty());
        assert!(hooks.install_files(&ctx).unwrap().is_empty());
        assert!(hooks.install_command(&ctx).unwrap().is_none());
        assert!(hooks.project_files(&ctx).is_empty());
        assert!(hooks.run_command(&ctx).is_none());
    }

    #[test]
    fn test_copy_spec_same() {
        assert_eq!(
            CopySpec::same("requirements.txt"),
            CopySpec::new("requirements.txt", "requirements.txt")
        );
    }
}
