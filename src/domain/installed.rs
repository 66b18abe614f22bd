//! Installed-package map derived from `pip freeze`

use std::collections::HashMap;

/// Map from identity key to the exact installed specifier (`Name==x.y.z`)
///
/// Derived fresh from the environment on each run; never persisted.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: HashMap<String, String>,
}

impl InstalledPackages {
    /// Build the map from `pip freeze` output.
    ///
    /// Only `Name==version` lines contribute; editable installs and direct
    /// URL references are ignored.
    pub fn parse(freeze_output: &str) -> Self {
        let mut packages = HashMap::new();
        for line in freeze_output.lines() {
            let spec = line.trim();
            if let Some((name, _version)) = spec.split_once("==") {
                if !name.is_empty() {
                    packages.insert(name.to_lowercase(), spec.to_string());
                }
            }
        }
        Self { packages }
    }

    /// Look up the exact specifier for an identity key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.packages.get(key).map(String::as_str)
    }

    /// Number of installed packages known
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_freeze() {
        let installed = InstalledPackages::parse("requests==2.31.0\nFlask==2.0.1\n");
        assert_eq!(installed.len(), 2);
        assert_eq!(installed.lookup("requests"), Some("requests==2.31.0"));
        assert_eq!(installed.lookup("flask"), Some("Flask==2.0.1"));
    }

    #[test]
    fn test_lookup_is_keyed_lowercase() {
        let installed = InstalledPackages::parse("SQLAlchemy==2.0.23");
        assert_eq!(installed.lookup("sqlalchemy"), Some("SQLAlchemy==2.0.23"));
        assert_eq!(installed.lookup("SQLAlchemy"), None);
    }

    #[test]
    fn test_parse_skips_non_exact_lines() {
        let freeze = "requests==2.31.0\n-e git+https://example.com/pkg.git#egg=pkg\npkg @ file:///tmp/pkg\n";
        let installed = InstalledPackages::parse(freeze);
        assert_eq!(installed.len(), 1);
        assert!(installed.lookup("pkg").is_none());
    }

    #[test]
    fn test_parse_empty_output() {
        let installed = InstalledPackages::parse("");
        assert!(installed.is_empty());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let installed = InstalledPackages::parse("  requests==2.31.0  \n");
        assert_eq!(installed.lookup("requests"), Some("requests==2.31.0"));
    }
}
