// src/registry.rs

//! Curated component metadata registry
//!
//! `registry.json` maps component names to authoritative dependency
//! declarations. Static scanning over-reports (documentation examples import
//! other components), so a declaration here always wins over scanning.
//!
//! ```json
//! {
//!   "dialog": {
//!     "dependencies": {
//!       "components": ["button"],
//!       "packages": ["@kobalte/core"]
//!     }
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Dependency declaration of a single registry entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeclaredDependencies {
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub packages: Vec<String>,
}

/// A registry entry; fields other than `dependencies` are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryEntry {
    #[serde(default)]
    pub dependencies: Option<DeclaredDependencies>,
}

/// Component metadata registry keyed by component name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: HashMap<String, RegistryEntry>,
}

impl Registry {
    /// Load a registry file
    ///
    /// Returns `None` when the file is absent or malformed; a malformed file
    /// is reported as a warning and resolution falls back to scanning.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No registry at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read registry {}: {}", path.display(), e);
                return None;
            }
        };

        match Self::parse(&content) {
            Ok(registry) => Some(registry),
            Err(e) => {
                warn!("Failed to parse registry {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Authoritative dependency declaration for a component, if any
    pub fn declared_dependencies(&self, name: &str) -> Option<&DeclaredDependencies> {
        self.entries.get(name)?.dependencies.as_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry() {
        let registry = Registry::parse(
            r#"{
                "dialog": {
                    "title": "Dialog",
                    "dependencies": { "components": ["button"], "packages": ["@kobalte/core"] }
                },
                "badge": {}
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        let deps = registry.declared_dependencies("dialog").unwrap();
        assert_eq!(deps.components, vec!["button"]);
        assert_eq!(deps.packages, vec!["@kobalte/core"]);
        assert!(registry.contains("badge"));
        assert!(registry.declared_dependencies("badge").is_none());
        assert!(registry.declared_dependencies("missing").is_none());
    }

    #[test]
    fn test_load_missing_registry() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Registry::load(&dir.path().join("registry.json")).is_none());
    }

    #[test]
    fn test_load_malformed_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(Registry::load(&path).is_none());
    }
}
