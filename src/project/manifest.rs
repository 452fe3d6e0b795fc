// src/project/manifest.rs

//! Read-only view of the target project's `package.json`

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// File name of the package manifest
pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the installer cares about
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    /// `packageManager` field, e.g. `pnpm@9.1.0`
    #[serde(default)]
    pub package_manager: Option<String>,
}

impl PackageManifest {
    /// Load `package.json` from a project root
    ///
    /// Absent or malformed manifests yield `None` so callers treat the
    /// project as having nothing installed.
    pub fn load(project_root: &Path) -> Option<Self> {
        let path = project_root.join(MANIFEST_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No package manifest at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Whether a package appears in any dependency section
    pub fn has_package(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
            || self.dev_dependencies.contains_key(name)
            || self.peer_dependencies.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_package_checks_all_sections() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{
                "name": "app",
                "dependencies": { "solid-js": "^1.8.0" },
                "devDependencies": { "typescript": "^5.0.0" },
                "peerDependencies": { "@kobalte/core": "*" },
                "packageManager": "pnpm@9.1.0"
            }"#,
        )
        .unwrap();

        assert!(manifest.has_package("solid-js"));
        assert!(manifest.has_package("typescript"));
        assert!(manifest.has_package("@kobalte/core"));
        assert!(!manifest.has_package("clsx"));
        assert_eq!(manifest.package_manager.as_deref(), Some("pnpm@9.1.0"));
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PackageManifest::load(dir.path()).is_none());

        fs::write(dir.path().join(MANIFEST_FILE), "{\"dependencies\": [}").unwrap();
        assert!(PackageManifest::load(dir.path()).is_none());
    }
}
