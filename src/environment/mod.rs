//! Environment descriptions
//!
//! An [`Environment`] is the ordered list of requirements detected for a
//! project. It is produced elsewhere (manifest detection) and handed to the
//! generators read-only. Order is the order the requirements were found in and
//! is kept wherever it shows up in generated output.

mod platform;
mod requirement;
mod tag_enum_macro;

pub use platform::RuntimePlatform;
pub use requirement::{OtherRequirement, PackageRequirement, Requirement};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Failed to read environment file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse environment file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Unsupported environment file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl Environment {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self { requirements }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Requirements of any kind tagged with `platform`, in order
    pub fn for_platform<'a>(
        &'a self,
        platform: &'a RuntimePlatform,
    ) -> impl Iterator<Item = &'a Requirement> + 'a {
        self.requirements
            .iter()
            .filter(move |req| req.runtime_platform() == Some(platform))
    }

    /// Package requirements tagged with `platform`, in order
    pub fn packages_for<'a>(
        &'a self,
        platform: &'a RuntimePlatform,
    ) -> impl Iterator<Item = &'a PackageRequirement> + 'a {
        self.for_platform(platform)
            .filter_map(Requirement::as_package)
    }

    pub fn has_platform(&self, platform: &RuntimePlatform) -> bool {
        self.for_platform(platform).next().is_some()
    }

    /// Distinct platforms in order of first appearance
    pub fn platforms(&self) -> Vec<&RuntimePlatform> {
        let mut seen: Vec<&RuntimePlatform> = Vec::new();
        for platform in self.requirements.iter().filter_map(Requirement::runtime_platform) {
            if !seen.contains(&platform) {
                seen.push(platform);
            }
        }
        seen
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Loads an environment file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self, EnvironmentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let is_yaml = match extension.as_deref() {
            Some("json") => false,
            Some("yaml") | Some("yml") => true,
            _ => return Err(EnvironmentError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = fs::read_to_string(path).map_err(|source| EnvironmentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if is_yaml {
            Self::from_yaml_str(&content).map_err(|e| e.to_string())
        } else {
            Self::from_json_str(&content).map_err(|e| e.to_string())
        };

        let environment = parsed.map_err(|message| EnvironmentError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            path = %path.display(),
            requirements = environment.requirements.len(),
            "Loaded environment"
        );

        Ok(environment)
    }
}

impl FromIterator<Requirement> for Environment {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Environment {
        Environment::new(vec![
            PackageRequirement::new("curl", "", RuntimePlatform::Deb).into(),
            PackageRequirement::new("arrow", "==0.12.1", RuntimePlatform::Python).into(),
            Requirement::Other(OtherRequirement {
                name: "gpu".to_string(),
                runtime_platform: None,
            }),
            PackageRequirement::new("numpy", ">=1.15", RuntimePlatform::Python).into(),
            PackageRequirement::new("", "", RuntimePlatform::Custom("R".to_string())).into(),
        ])
    }

    #[test]
    fn test_packages_for_keeps_order() {
        let env = sample();
        let names: Vec<&str> = env
            .packages_for(&RuntimePlatform::Python)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["arrow", "numpy"]);
    }

    #[test]
    fn test_has_platform() {
        let env = sample();
        assert!(env.has_platform(&RuntimePlatform::Deb));
        assert!(env.has_platform(&RuntimePlatform::Python));
        assert!(!Environment::empty().has_platform(&RuntimePlatform::Python));
    }

    #[test]
    fn test_platforms_in_first_appearance_order() {
        let env = sample();
        assert_eq!(
            env.platforms(),
            vec![
                &RuntimePlatform::Deb,
                &RuntimePlatform::Python,
                &RuntimePlatform::Custom("R".to_string())
            ]
        );
    }

    #[test]
    fn test_load_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json_path = dir.path().join("environ.json");
        fs::write(
            &json_path,
            r#"{"requirements":[{"type":"package","name":"arrow","version":"==0.12.1","runtimePlatform":"Python"}]}"#,
        )
        .unwrap();

        let yaml_path = dir.path().join("environ.yaml");
        fs::write(
            &yaml_path,
            "requirements:\n  - type: package\n    name: arrow\n    version: \"==0.12.1\"\n    runtimePlatform: Python\n",
        )
        .unwrap();

        let from_json = Environment::load(&json_path).unwrap();
        let from_yaml = Environment::load(&yaml_path).unwrap();
        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json.requirements.len(), 1);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("environ.toml");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            Environment::load(&path),
            Err(EnvironmentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("environ.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Environment::load(&path),
            Err(EnvironmentError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_document_has_no_requirements() {
        let env = Environment::from_json_str("{}").unwrap();
        assert!(env.is_empty());
    }
}
