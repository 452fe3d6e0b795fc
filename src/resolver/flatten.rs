// src/resolver/flatten.rs

//! Collapse a dependency tree into deduplicated sets

use super::DependencyTree;
use crate::scanner::PackageDependency;

/// Every component and package a tree depends on, excluding its root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatDependencies {
    /// Component names in depth-first discovery order
    pub components: Vec<String>,
    /// Packages in discovery order with imports merged across all nodes
    pub packages: Vec<PackageDependency>,
}

impl FlatDependencies {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.packages.is_empty()
    }

    fn add_package(&mut self, package: &PackageDependency) {
        match self.packages.iter_mut().find(|p| p.name == package.name) {
            Some(existing) => existing.merge(package),
            None => self.packages.push(package.clone()),
        }
    }
}

/// Flatten a tree depth-first, skipping `visited` markers
pub fn flatten(tree: &DependencyTree) -> FlatDependencies {
    let mut flat = FlatDependencies::default();
    collect(tree, &tree.name, &mut flat);
    flat
}

fn collect(node: &DependencyTree, root: &str, flat: &mut FlatDependencies) {
    if node.visited {
        return;
    }

    if node.name != root && !flat.components.contains(&node.name) {
        flat.components.push(node.name.clone());
    }
    for package in &node.package_dependencies {
        flat.add_package(package);
    }
    for dep in &node.dependencies {
        collect(dep, root, flat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn node(name: &str, deps: Vec<DependencyTree>, packages: Vec<PackageDependency>) -> DependencyTree {
        DependencyTree {
            name: name.to_string(),
            dependencies: deps,
            package_dependencies: packages,
            visited: false,
        }
    }

    #[test]
    fn test_flatten_excludes_root_and_merges_packages() {
        let tree = node(
            "dialog",
            vec![
                node(
                    "button",
                    vec![],
                    vec![PackageDependency::new("@kobalte/core").with_imports(["Button"])],
                ),
                node("dialog", vec![], vec![]),
                DependencyTree::visited("dialog"),
            ],
            vec![PackageDependency::new("@kobalte/core").with_imports(["Dialog"])],
        );

        let flat = flatten(&tree);
        assert_eq!(flat.components, vec!["button"]);
        assert_eq!(flat.packages.len(), 1);
        assert_eq!(
            flat.packages[0].imports,
            BTreeSet::from(["Button".to_string(), "Dialog".to_string()])
        );
    }

    #[test]
    fn test_flatten_depth_first_order_and_dedup() {
        let tree = node(
            "root",
            vec![
                node("a", vec![node("c", vec![], vec![])], vec![]),
                node("b", vec![node("c", vec![], vec![])], vec![]),
            ],
            vec![],
        );

        assert_eq!(flatten(&tree).components, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_flatten_skips_visited_subtree() {
        let mut marker = DependencyTree::visited("x");
        marker.package_dependencies.push(PackageDependency::new("never"));
        let tree = node("root", vec![marker], vec![]);

        assert!(flatten(&tree).is_empty());
    }
}
