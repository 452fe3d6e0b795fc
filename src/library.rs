// src/library.rs

//! Component library on disk
//!
//! A library is a directory with the component sources under `components/`
//! and an optional `registry.json` next to it.

use crate::registry::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Subdirectory of a library holding component sources
pub const COMPONENTS_SUBDIR: &str = "components";

/// File name of the metadata registry inside a library
pub const REGISTRY_FILE: &str = "registry.json";

/// A component library checkout
#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    root: PathBuf,
    extensions: Vec<String>,
}

impl ComponentLibrary {
    /// Open a library rooted at `root` using the given source extensions
    pub fn new(root: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions.to_vec(),
        }
    }

    pub fn components_dir(&self) -> PathBuf {
        self.root.join(COMPONENTS_SUBDIR)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    /// Load the library's registry (absent or malformed → `None`)
    pub fn registry(&self) -> Option<Registry> {
        let registry = Registry::load(&self.registry_path())?;
        if registry.is_empty() {
            debug!("Registry {} has no entries", self.registry_path().display());
        } else {
            debug!("Loaded {} registry entries", registry.len());
        }
        Some(registry)
    }

    /// Locate the source file of a component
    ///
    /// Extensions are tried in order against `components/<name>`; if none
    /// match, the components tree is searched for a file with that stem.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let dir = self.components_dir();
        for ext in &self.extensions {
            let candidate = dir.join(format!("{}{}", name, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        let found = self
            .source_files()
            .into_iter()
            .find(|path| self.component_name(path).as_deref() == Some(name));
        if found.is_none() {
            debug!("Component source not found: {}", name);
        }
        found
    }

    /// Read a component's source text
    pub fn read_source(&self, name: &str) -> Option<(PathBuf, String)> {
        let path = self.locate(name)?;
        let content = fs::read_to_string(&path).ok()?;
        Some((path, content))
    }

    /// Names of all components in the library, sorted and deduplicated
    pub fn component_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .source_files()
            .iter()
            .filter_map(|path| self.component_name(path))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn component_name(&self, path: &Path) -> Option<String> {
        let file = path.file_name()?.to_str()?;
        self.extensions
            .iter()
            .find_map(|ext| file.strip_suffix(ext.as_str()))
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
    }

    fn source_files(&self) -> Vec<PathBuf> {
        WalkDir::new(self.components_dir())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.component_name(path).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;

    fn library(root: &Path) -> ComponentLibrary {
        ComponentLibrary::new(root, &ScanConfig::default().source_extensions)
    }

    #[test]
    fn test_locate_prefers_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        let components = dir.path().join(COMPONENTS_SUBDIR);
        fs::create_dir_all(&components).unwrap();
        fs::write(components.join("button.ts"), "export {}").unwrap();
        fs::write(components.join("button.tsx"), "export {}").unwrap();

        let lib = library(dir.path());
        assert_eq!(lib.locate("button"), Some(components.join("button.tsx")));
        assert_eq!(lib.locate("missing"), None);
    }

    #[test]
    fn test_locate_nested_source() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(COMPONENTS_SUBDIR).join("forms");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("checkbox.jsx"), "export {}").unwrap();

        let lib = library(dir.path());
        assert_eq!(lib.locate("checkbox"), Some(nested.join("checkbox.jsx")));
    }

    #[test]
    fn test_component_names() {
        let dir = tempfile::tempdir().unwrap();
        let components = dir.path().join(COMPONENTS_SUBDIR);
        fs::create_dir_all(&components).unwrap();
        fs::write(components.join("dialog.tsx"), "").unwrap();
        fs::write(components.join("button.tsx"), "").unwrap();
        fs::write(components.join("button.ts"), "").unwrap();
        fs::write(components.join("README.md"), "").unwrap();

        assert_eq!(library(dir.path()).component_names(), vec!["button", "dialog"]);
    }
}
