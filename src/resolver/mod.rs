// src/resolver/mod.rs

//! Component dependency resolution
//!
//! Builds a [`DependencyTree`] for a requested component by following its
//! component imports recursively. A curated registry declaration takes
//! precedence over scanning the component's source, because the source also
//! carries documentation examples whose imports are not install-time
//! dependencies.
//!
//! Cycles are bounded by the path-so-far: a name that already occurs between
//! the root and the current node becomes a `visited` leaf.

mod ancestors;
mod flatten;

pub use ancestors::Ancestors;
pub use flatten::{flatten, FlatDependencies};

use crate::config::ScanConfig;
use crate::library::ComponentLibrary;
use crate::registry::{DeclaredDependencies, Registry};
use crate::scanner::{package_root_name, scan_file, PackageDependency};
use serde::Serialize;
use tracing::{debug, warn};

/// Recursive dependency tree of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTree {
    pub name: String,
    pub dependencies: Vec<DependencyTree>,
    pub package_dependencies: Vec<PackageDependency>,
    /// Set on a node whose name already occurs on the path above it
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub visited: bool,
}

impl DependencyTree {
    /// A node with no dependencies
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            package_dependencies: Vec::new(),
            visited: false,
        }
    }

    /// Terminal marker for a name re-entered through a cycle
    pub fn visited(name: impl Into<String>) -> Self {
        Self {
            visited: true,
            ..Self::leaf(name)
        }
    }

    /// Depth-first iterator over this node and all descendants
    pub fn walk(&self) -> Vec<&DependencyTree> {
        let mut nodes = vec![self];
        for dep in &self.dependencies {
            nodes.extend(dep.walk());
        }
        nodes
    }
}

/// Builds dependency trees against a component library
pub struct DependencyResolver<'a> {
    library: &'a ComponentLibrary,
    registry: Option<&'a Registry>,
    config: &'a ScanConfig,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(library: &'a ComponentLibrary, config: &'a ScanConfig) -> Self {
        Self {
            library,
            registry: None,
            config,
        }
    }

    /// Use a curated registry ahead of source scanning
    pub fn with_registry(mut self, registry: Option<&'a Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Build the full dependency tree rooted at `name`
    pub fn build_tree(&self, name: &str) -> DependencyTree {
        self.build(name, None)
    }

    fn build(&self, name: &str, path: Option<&Ancestors<'_>>) -> DependencyTree {
        if let Some(cycle) = path.filter(|p| p.contains(name)) {
            debug!("Cycle detected: {} -> {}", cycle.to_vec().join(" -> "), name);
            return DependencyTree::visited(name);
        }

        let here = match path {
            Some(parent) => parent.push(name),
            None => Ancestors::root(name),
        };

        let declared = self
            .registry
            .and_then(|registry| registry.declared_dependencies(name));
        match declared {
            Some(declared) => self.from_registry(name, declared, &here),
            None => self.from_source(name, &here),
        }
    }

    fn from_registry(
        &self,
        name: &str,
        declared: &DeclaredDependencies,
        here: &Ancestors<'_>,
    ) -> DependencyTree {
        debug!("Resolving {} from registry", name);

        let mut packages: Vec<PackageDependency> = Vec::new();
        for package in &declared.packages {
            if self.config.is_virtual_module(package) {
                continue;
            }
            let root = package_root_name(package);
            if !packages.iter().any(|p| p.name == root) {
                packages.push(PackageDependency::new(root));
            }
        }

        let dependencies = declared
            .components
            .iter()
            .map(|component| self.build(component, Some(here)))
            .collect();

        DependencyTree {
            name: name.to_string(),
            dependencies,
            package_dependencies: packages,
            visited: false,
        }
    }

    fn from_source(&self, name: &str, here: &Ancestors<'_>) -> DependencyTree {
        let Some(path) = self.library.locate(name) else {
            debug!("No registry entry or source for {}", name);
            return DependencyTree::leaf(name);
        };

        let scanned = match scan_file(&path, self.config) {
            Ok(scanned) => scanned,
            Err(e) => {
                warn!("Failed to scan {}: {}", path.display(), e);
                return DependencyTree::leaf(name);
            }
        };

        let dependencies = scanned
            .components
            .iter()
            .map(|component| self.build(&component.name, Some(here)))
            .collect();

        DependencyTree {
            name: name.to_string(),
            dependencies,
            package_dependencies: scanned.packages,
            visited: false,
        }
    }
}
