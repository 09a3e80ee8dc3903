use super::RuntimePlatform;
use serde::{Deserialize, Serialize};

/// An installable package for one runtime platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequirement {
    pub name: String,
    /// Operator and version as written in the source manifest (e.g. `==0.12.1`),
    /// empty for "any version"
    #[serde(default)]
    pub version: String,
    pub runtime_platform: RuntimePlatform,
}

impl PackageRequirement {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        runtime_platform: RuntimePlatform,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            runtime_platform,
        }
    }

    /// `name` immediately followed by `version`, the manifest line format
    pub fn spec_line(&self) -> String {
        format!("{}{}", self.name, self.version)
    }
}

/// A requirement that isn't an installable package (hardware, services, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherRequirement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_platform: Option<RuntimePlatform>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Requirement {
    Package(PackageRequirement),
    Other(OtherRequirement),
}

impl Requirement {
    pub fn runtime_platform(&self) -> Option<&RuntimePlatform> {
        match self {
            Requirement::Package(package) => Some(&package.runtime_platform),
            Requirement::Other(other) => other.runtime_platform.as_ref(),
        }
    }

    pub fn as_package(&self) -> Option<&PackageRequirement> {
        match self {
            Requirement::Package(package) => Some(package),
            Requirement::Other(_) => None,
        }
    }
}

impl From<PackageRequirement> for Requirement {
    fn from(package: PackageRequirement) -> Self {
        Requirement::Package(package)
    }
}
