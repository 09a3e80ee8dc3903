use super::base::{Generator, HeaderInfo};
use super::deb::DebHooks;
use super::hooks::BaseHooks;
use super::python::{PythonHooks, REQUIREMENTS_FILE};
use super::tables::PythonVersion;
use crate::environment::{Environment, RuntimePlatform};
use crate::fs::ProjectFolder;
use std::fmt;
use tracing::debug;

/// One case per supported runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Base,
    Deb,
    Python(PythonVersion),
}

impl Ecosystem {
    /// Generator for a platform tag. Tags without a generator get the base
    /// generator, which only emits the base image.
    pub fn for_platform(platform: &RuntimePlatform, python: PythonVersion) -> Self {
        match platform {
            RuntimePlatform::Deb => Self::Deb,
            RuntimePlatform::Python => Self::Python(python),
            RuntimePlatform::Custom(_) => Self::Base,
        }
    }

    /// First platform in the environment that has a generator, falling back
    /// to Python when the project ships a `requirements.txt`
    pub fn detect(environment: &Environment, folder: &ProjectFolder, python: PythonVersion) -> Self {
        let detected = environment
            .platforms()
            .into_iter()
            .map(|platform| Self::for_platform(platform, python))
            .find(|ecosystem| *ecosystem != Self::Base);

        let ecosystem = match detected {
            Some(ecosystem) => ecosystem,
            None if folder.exists(REQUIREMENTS_FILE) => Self::Python(python),
            None => Self::Base,
        };
        debug!(ecosystem = %ecosystem, "Selected ecosystem");

        ecosystem
    }

    pub fn platform(&self) -> Option<RuntimePlatform> {
        match self {
            Self::Base => None,
            Self::Deb => Some(RuntimePlatform::Deb),
            Self::Python(_) => Some(RuntimePlatform::Python),
        }
    }

    pub fn generator<'a>(
        self,
        environment: &'a Environment,
        folder: ProjectFolder,
        header: HeaderInfo,
    ) -> Generator<'a> {
        match self {
            Self::Base => Generator::with_header(BaseHooks, environment, folder, header),
            Self::Deb => Generator::with_header(DebHooks, environment, folder, header),
            Self::Python(version) => {
                Generator::with_header(PythonHooks::new(version), environment, folder, header)
            }
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Deb => write!(f, "deb"),
            Self::Python(version) => write!(f, "python{}", version.major()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{OtherRequirement, PackageRequirement, Requirement};
    use yare::parameterized;

    #[parameterized(
        deb = { RuntimePlatform::Deb, Ecosystem::Deb },
        python = { RuntimePlatform::Python, Ecosystem::Python(PythonVersion::Three) },
        unknown = { RuntimePlatform::Custom("R".to_string()), Ecosystem::Base },
        lowercase_python = { RuntimePlatform::Custom("python".to_string()), Ecosystem::Base },
    )]
    fn test_for_platform(platform: RuntimePlatform, expected: Ecosystem) {
        assert_eq!(
            Ecosystem::for_platform(&platform, PythonVersion::Three),
            expected
        );
    }

    #[test]
    fn test_detect_first_supported_platform() {
        let env = Environment::new(vec![
            Requirement::Other(OtherRequirement {
                name: "gpu".to_string(),
                runtime_platform: None,
            }),
            PackageRequirement::new("ggplot2", "", RuntimePlatform::Custom("R".to_string())).into(),
            PackageRequirement::new("arrow", "", RuntimePlatform::Python).into(),
            PackageRequirement::new("curl", "", RuntimePlatform::Deb).into(),
        ]);
        let folder = ProjectFolder::temporary().unwrap();

        assert_eq!(
            Ecosystem::detect(&env, &folder, PythonVersion::Two),
            Ecosystem::Python(PythonVersion::Two)
        );
    }

    #[test]
    fn test_detect_falls_back_to_requirements_file() {
        let env = Environment::empty();
        let folder = ProjectFolder::temporary().unwrap();
        assert_eq!(
            Ecosystem::detect(&env, &folder, PythonVersion::Three),
            Ecosystem::Base
        );

        folder.write("requirements.txt", "arrow\n").unwrap();
        assert_eq!(
            Ecosystem::detect(&env, &folder, PythonVersion::Three),
            Ecosystem::Python(PythonVersion::Three)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Ecosystem::Base.to_string(), "base");
        assert_eq!(Ecosystem::Deb.to_string(), "deb");
        assert_eq!(Ecosystem::Python(PythonVersion::Two).to_string(), "python2");
    }

    #[test]
    fn test_platform() {
        assert_eq!(Ecosystem::Base.platform(), None);
        assert_eq!(
            Ecosystem::Python(PythonVersion::Three).platform(),
            Some(RuntimePlatform::Python)
        );
    }
}
