//! Debian system packages
//!
//! Requirements tagged `deb` become the apt install list. Nothing is
//! installed at the user level.

use super::hooks::{HookContext, Hooks};
use crate::environment::RuntimePlatform;

#[derive(Debug, Default, Clone, Copy)]
pub struct DebHooks;

impl Hooks for DebHooks {
    fn name(&self) -> &str {
        "deb"
    }

    fn applies_runtime(&self) -> Option<RuntimePlatform> {
        Some(RuntimePlatform::Deb)
    }

    /// Package names in environment order, first occurrence wins
    fn apt_packages(&self, ctx: &HookContext<'_>) -> Vec<String> {
        let mut packages: Vec<String> = Vec::new();
        for package in ctx.environment.packages_for(&RuntimePlatform::Deb) {
            if !package.name.is_empty() && !packages.contains(&package.name) {
                packages.push(package.name.clone());
            }
        }
        packages
    }
}
