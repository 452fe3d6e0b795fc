// src/config.rs

//! Configuration for the pipeline stages and the consumer project
//!
//! Every stage receives its configuration explicitly. `ScanConfig` and
//! `TransformConfig` carry the conventions of the component library (ignore
//! list, virtual module prefixes, metadata naming), while `ProjectConfig` is
//! the consumer's `components.json`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the consumer project configuration
pub const PROJECT_CONFIG_FILE: &str = "components.json";

/// Default directory (relative to the project root) for installed components
pub const DEFAULT_COMPONENTS_DIR: &str = "src/components/ui";

/// Icon library the component sources are authored against
pub const CANONICAL_ICON_LIBRARY: &str = "lucide";

/// Source extensions probed when locating a component, in priority order
pub const SOURCE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];

/// Helper inlined into every installed component in place of the shared
/// utility import
pub const INLINE_UTILITY: &str = r#"import type { ClassValue } from "clsx";
import { clsx } from "clsx";
import { twMerge } from "tailwind-merge";

function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}"#;

/// Import scanning conventions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Local names that are never reported (the inlined utility)
    pub ignore_list: BTreeSet<String>,
    /// Import source prefixes resolved by build plugins, not installable
    pub virtual_module_prefixes: Vec<String>,
    /// Path segment / file stem names that mark a utility module
    pub utility_path_names: Vec<String>,
    /// Extensions stripped from component names and probed on disk
    pub source_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_list: BTreeSet::from(["cn".to_string()]),
            virtual_module_prefixes: vec!["~".to_string()],
            utility_path_names: ["utils", "util", "lib", "helpers", "helper"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Whether an import source is a build-time virtual module
    pub fn is_virtual_module(&self, source: &str) -> bool {
        self.virtual_module_prefixes
            .iter()
            .any(|prefix| source.starts_with(prefix.as_str()))
    }

    /// Whether a local binding name is on the ignore list
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_list.contains(name)
    }
}

/// Source rewriting conventions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Name of the documentation-only metadata export
    pub meta_export: String,
    /// Type name the metadata export is annotated with
    pub meta_type: String,
    /// Local name of the shared utility that gets inlined
    pub utility_name: String,
    /// Code block inserted after the imports
    pub inline_utility: String,
    /// Prefix of virtual icon imports, e.g. `~icons/`
    pub icon_prefix: String,
    /// Icon library the sources reference
    pub canonical_icon_library: String,
    /// Icon library the consumer wants
    pub icon_library: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            meta_export: "meta".to_string(),
            meta_type: "ComponentMeta".to_string(),
            utility_name: "cn".to_string(),
            inline_utility: INLINE_UTILITY.to_string(),
            icon_prefix: "~icons/".to_string(),
            canonical_icon_library: CANONICAL_ICON_LIBRARY.to_string(),
            icon_library: CANONICAL_ICON_LIBRARY.to_string(),
        }
    }
}

impl TransformConfig {
    /// Default conventions with the consumer's icon library
    pub fn for_project(project: &ProjectConfig) -> Self {
        Self {
            icon_library: project.icon_library.clone(),
            ..Self::default()
        }
    }
}

/// Consumer project configuration (`components.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Directory, relative to the project root, that receives components
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    /// Icon library used by the project
    #[serde(default = "default_icon_library")]
    pub icon_library: String,
}

fn default_components_dir() -> String {
    DEFAULT_COMPONENTS_DIR.to_string()
}

fn default_icon_library() -> String {
    CANONICAL_ICON_LIBRARY.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            components_dir: default_components_dir(),
            icon_library: default_icon_library(),
        }
    }
}

impl ProjectConfig {
    /// Path of `components.json` inside a project root
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// Load `components.json` from a project root
    ///
    /// Unlike the package manifest, a missing project config is an error:
    /// nothing can be installed into a project that was never initialized.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path_in(project_root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotInitialized(path));
            }
            Err(e) => return Err(e.into()),
        };

        let config = serde_json::from_str(&content)
            .map_err(|source| Error::ConfigParse { path: path.clone(), source })?;
        debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    /// Serialize as pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Absolute components directory for a project root
    pub fn components_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.components_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert!(config.is_ignored("cn"));
        assert!(!config.is_ignored("Button"));
        assert!(config.is_virtual_module("~icons/lucide/x"));
        assert!(!config.is_virtual_module("solid-js"));
    }

    #[test]
    fn test_project_config_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotInitialized(_)));
    }

    #[test]
    fn test_project_config_load_partial_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), r#"{"iconLibrary": "tabler"}"#).unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config.icon_library, "tabler");
        assert_eq!(config.components_dir, DEFAULT_COMPONENTS_DIR);
    }

    #[test]
    fn test_project_config_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "{ not json").unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_project_config_json_is_camel_case() {
        let json = ProjectConfig::default().to_json().unwrap();
        assert!(json.contains("\"componentsDir\""));
        assert!(json.contains("\"iconLibrary\""));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_transform_config_for_project() {
        let project = ProjectConfig {
            icon_library: "tabler".to_string(),
            ..ProjectConfig::default()
        };
        let config = TransformConfig::for_project(&project);
        assert_eq!(config.icon_library, "tabler");
        assert_eq!(config.canonical_icon_library, CANONICAL_ICON_LIBRARY);
    }
}
