//! Python ecosystem
//!
//! Package requirements tagged `Python` are written to a generated
//! `.requirements.txt` and installed with pip as the unprivileged user. When
//! there are none, an existing `requirements.txt` in the project is used as
//! is. Structured requirements always take precedence over the file.

use super::hooks::{CopySpec, HookContext, Hooks};
use super::tables::PythonVersion;
use super::GenerateError;
use crate::environment::RuntimePlatform;
use tracing::{debug, info};

/// Manifest written from the environment's requirements
pub const GENERATED_REQUIREMENTS_FILE: &str = ".requirements.txt";

/// Manifest a Python project conventionally ships
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

pub const MAIN_SCRIPT: &str = "main.py";

#[derive(Debug, Default, Clone, Copy)]
pub struct PythonHooks {
    version: PythonVersion,
}

impl PythonHooks {
    pub fn new(version: PythonVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> PythonVersion {
        self.version
    }

    fn has_requirements(&self, ctx: &HookContext<'_>) -> bool {
        ctx.environment
            .packages_for(&RuntimePlatform::Python)
            .next()
            .is_some()
    }

    /// One `name` + `version` line per requirement, in environment order
    pub fn requirements_content(&self, ctx: &HookContext<'_>) -> String {
        ctx.environment
            .packages_for(&RuntimePlatform::Python)
            .map(|package| package.spec_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Manifest the install step uses, if any
    fn manifest(&self, ctx: &HookContext<'_>) -> Option<&'static str> {
        if self.has_requirements(ctx) {
            Some(GENERATED_REQUIREMENTS_FILE)
        } else if ctx.folder.exists(REQUIREMENTS_FILE) {
            Some(REQUIREMENTS_FILE)
        } else {
            None
        }
    }
}

impl Hooks for PythonHooks {
    fn name(&self) -> &str {
        "python"
    }

    fn applies_runtime(&self) -> Option<RuntimePlatform> {
        Some(RuntimePlatform::Python)
    }

    fn applies(&self, ctx: &HookContext<'_>) -> bool {
        ctx.environment.has_platform(&RuntimePlatform::Python)
            || ctx.folder.exists(REQUIREMENTS_FILE)
    }

    fn apt_packages(&self, _ctx: &HookContext<'_>) -> Vec<String> {
        self.version.apt_packages()
    }

    fn install_files(&self, ctx: &HookContext<'_>) -> Result<Vec<CopySpec>, GenerateError> {
        match self.manifest(ctx) {
            Some(GENERATED_REQUIREMENTS_FILE) => {
                let content = self.requirements_content(ctx);
                ctx.folder.write(GENERATED_REQUIREMENTS_FILE, &content)?;
                info!(
                    file = GENERATED_REQUIREMENTS_FILE,
                    packages = content.lines().count(),
                    "Generated Python requirements"
                );
                Ok(vec![CopySpec::same(GENERATED_REQUIREMENTS_FILE)])
            }
            Some(existing) => {
                let content = ctx.folder.read(existing)?;
                let entries = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .count();
                debug!(file = existing, entries, "Using existing Python requirements");
                Ok(vec![CopySpec::same(existing)])
            }
            None => Ok(Vec::new()),
        }
    }

    fn install_command(&self, ctx: &HookContext<'_>) -> Result<Option<String>, GenerateError> {
        Ok(self.manifest(ctx).map(|manifest| {
            format!("{} install --user --requirement {}", self.version.pip(), manifest)
        }))
    }

    fn project_files(&self, ctx: &HookContext<'_>) -> Vec<CopySpec> {
        if ctx.folder.exists(MAIN_SCRIPT) {
            vec![CopySpec::same(".")]
        } else {
            Vec::new()
        }
    }

    fn run_command(&self, ctx: &HookContext<'_>) -> Option<String> {
        ctx.folder
            .exists(MAIN_SCRIPT)
            .then(|| format!("{} {}", self.version.interpreter(), MAIN_SCRIPT))
    }
}
