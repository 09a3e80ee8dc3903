crate::define_tag_enum! {
    /// Runtime platform a requirement belongs to
    RuntimePlatform {
        /// Debian/Ubuntu system packages installed with apt
        Deb => "deb" | "apt" | "debian",
        Python => "Python" | "python" | "py",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tag_serialization() {
        assert_eq!(
            serde_json::to_string(&RuntimePlatform::Python).unwrap(),
            "\"Python\""
        );
        assert_eq!(serde_json::to_string(&RuntimePlatform::Deb).unwrap(), "\"deb\"");
    }

    #[test]
    fn test_unknown_tag_is_custom() {
        let platform: RuntimePlatform = serde_json::from_str("\"R\"").unwrap();
        assert_eq!(platform, RuntimePlatform::Custom("R".to_string()));
        assert_eq!(serde_json::to_string(&platform).unwrap(), "\"R\"");
    }

    #[test]
    fn test_deserialization_is_exact() {
        // Aliases are for humans, not for manifests
        let platform: RuntimePlatform = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(platform, RuntimePlatform::Custom("python".to_string()));
        assert_ne!(platform, RuntimePlatform::Python);
    }

    #[test]
    fn test_from_name_with_aliases() {
        assert_eq!(RuntimePlatform::from_name("Python"), Some(RuntimePlatform::Python));
        assert_eq!(RuntimePlatform::from_name("python"), Some(RuntimePlatform::Python));
        assert_eq!(RuntimePlatform::from_name("py"), Some(RuntimePlatform::Python));
        assert_eq!(RuntimePlatform::from_name("deb"), Some(RuntimePlatform::Deb));
        assert_eq!(RuntimePlatform::from_name("apt"), Some(RuntimePlatform::Deb));
        assert_eq!(RuntimePlatform::from_name("node"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RuntimePlatform::Python.to_string(), "Python");
        assert_eq!(RuntimePlatform::Deb.to_string(), "deb");
        assert_eq!(RuntimePlatform::Custom("R".to_string()).to_string(), "R");
    }

    #[test]
    fn test_all_variants() {
        assert_eq!(
            RuntimePlatform::all_variants(),
            &[RuntimePlatform::Deb, RuntimePlatform::Python]
        );
    }
}
