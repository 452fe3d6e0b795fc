// src/project/mod.rs

//! Target project state
//!
//! Answers "is this already installed?" for flattened dependency sets:
//! components by probing the configured components directory, packages by
//! looking them up in `package.json`.

mod manifest;

pub use manifest::{PackageManifest, MANIFEST_FILE};

use crate::resolver::{flatten, DependencyResolver, FlatDependencies};
use crate::scanner::PackageDependency;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Installed/missing partition accumulated over a batch of requested roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionState {
    pub missing_components: Vec<String>,
    pub missing_packages: Vec<PackageDependency>,
    pub installed_components: Vec<String>,
    pub installed_packages: Vec<PackageDependency>,
}

impl ResolutionState {
    fn seen_component(&self, name: &str) -> bool {
        self.missing_components.iter().any(|c| c == name)
            || self.installed_components.iter().any(|c| c == name)
    }

    fn add_package(list: &mut Vec<PackageDependency>, package: &PackageDependency) {
        match list.iter_mut().find(|p| p.name == package.name) {
            Some(existing) => existing.merge(package),
            None => list.push(package.clone()),
        }
    }

    pub fn has_missing(&self) -> bool {
        !self.missing_components.is_empty() || !self.missing_packages.is_empty()
    }
}

/// The consumer project being installed into
#[derive(Debug, Clone)]
pub struct ProjectState {
    root: PathBuf,
    components_dir: PathBuf,
    manifest: Option<PackageManifest>,
    extensions: Vec<String>,
}

impl ProjectState {
    /// Read project state from disk
    pub fn load(root: &Path, components_dir: PathBuf, extensions: &[String]) -> Self {
        Self::with_manifest(root, components_dir, extensions, PackageManifest::load(root))
    }

    pub fn with_manifest(
        root: &Path,
        components_dir: PathBuf,
        extensions: &[String],
        manifest: Option<PackageManifest>,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            components_dir,
            manifest,
            extensions: extensions.to_vec(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn components_dir(&self) -> &Path {
        &self.components_dir
    }

    pub fn manifest(&self) -> Option<&PackageManifest> {
        self.manifest.as_ref()
    }

    /// Path of an installed component, probing extensions in order
    pub fn installed_component_path(&self, name: &str) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| self.components_dir.join(format!("{}{}", name, ext)))
            .find(|path| path.is_file())
    }

    pub fn is_component_installed(&self, name: &str) -> bool {
        self.installed_component_path(name).is_some()
    }

    /// Without a readable manifest nothing counts as installed
    pub fn is_package_installed(&self, name: &str) -> bool {
        self.manifest
            .as_ref()
            .is_some_and(|manifest| manifest.has_package(name))
    }

    /// Partition one flattened dependency set into `state`
    ///
    /// Names already classified by an earlier root are left where they are;
    /// package imports are still merged into the existing entry.
    pub fn partition(&self, flat: &FlatDependencies, state: &mut ResolutionState) {
        for component in &flat.components {
            if state.seen_component(component) {
                continue;
            }
            if self.is_component_installed(component) {
                state.installed_components.push(component.clone());
            } else {
                state.missing_components.push(component.clone());
            }
        }

        for package in &flat.packages {
            let installed = self.is_package_installed(&package.name);
            let mut package = package.clone();
            package.is_installed = Some(installed);
            if installed {
                ResolutionState::add_package(&mut state.installed_packages, &package);
            } else {
                ResolutionState::add_package(&mut state.missing_packages, &package);
            }
        }
    }

    /// Resolve and partition the dependencies of every requested component
    pub fn missing_dependencies(
        &self,
        requested: &[String],
        resolver: &DependencyResolver<'_>,
    ) -> ResolutionState {
        let mut state = ResolutionState::default();
        for name in requested {
            let tree = resolver.build_tree(name);
            let flat = flatten(&tree);
            debug!(
                "{}: {} component(s), {} package(s)",
                name,
                flat.components.len(),
                flat.packages.len()
            );
            self.partition(&flat, &mut state);
        }
        state
    }
}
