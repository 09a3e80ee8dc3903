//! Fixed values shared by all generators

/// Base image used when an ecosystem doesn't ship its own
pub const DEFAULT_BASE_NAME: &str = "ubuntu";
pub const DEFAULT_BASE_VERSION: &str = "18.04";

/// Managed Dockerfile written on every generation. Hidden so it never
/// clobbers a hand-authored `Dockerfile`.
pub const MANAGED_DOCKERFILE: &str = ".Dockerfile";

/// Marker downstream tooling looks for to find the managed install region
pub const MANAGED_MARKER: &str = "dockter";

/// Unprivileged user that language-level installs and the container run as
pub const USER_NAME: &str = "dockteruser";
pub const USER_ID: u32 = 1001;

pub const KEYSERVER: &str = "keyserver.ubuntu.com";

/// Packages apt needs before third-party repositories can be added
pub const REPOSITORY_TOOLS: &[&str] = &[
    "apt-transport-https",
    "ca-certificates",
    "software-properties-common",
];

/// Python toolchain generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PythonVersion {
    Two,
    #[default]
    Three,
}

impl PythonVersion {
    /// Maps the numeric major-version selector; anything other than 2 or 3 is
    /// rejected
    pub fn from_major(major: u8) -> Option<Self> {
        match major {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    pub fn major(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Suffix on package and command names (`python3`, `pip3`)
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Two => "",
            Self::Three => "3",
        }
    }

    pub fn interpreter(self) -> String {
        format!("python{}", self.suffix())
    }

    pub fn pip(self) -> String {
        format!("pip{}", self.suffix())
    }

    pub fn apt_packages(self) -> Vec<String> {
        vec![self.interpreter(), format!("{}-pip", self.interpreter())]
    }
}
