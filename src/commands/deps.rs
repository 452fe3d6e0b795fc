// src/commands/deps.rs
//! `solder deps`: dependency tree of one component

use super::Workspace;
use anyhow::Result;
use solder::{flatten, DependencyResolver, DependencyTree, Error};
use std::path::Path;

fn print_tree(node: &DependencyTree, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.visited {
        println!("{}{} (cycle)", indent, node.name);
        return;
    }
    let packages: Vec<&str> = node
        .package_dependencies
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    if packages.is_empty() {
        println!("{}{}", indent, node.name);
    } else {
        println!("{}{} [{}]", indent, node.name, packages.join(", "));
    }
    for dep in &node.dependencies {
        print_tree(dep, depth + 1);
    }
}

fn or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

pub fn cmd_deps(library_root: &Path, component: &str, json: bool) -> Result<()> {
    let workspace = Workspace::open(library_root)?;
    if workspace.library.locate(component).is_none()
        && !workspace.registry.as_ref().is_some_and(|r| r.contains(component))
    {
        return Err(Error::ComponentNotFound(component.to_string()).into());
    }

    let resolver = DependencyResolver::new(&workspace.library, &workspace.scan)
        .with_registry(workspace.registry.as_ref());
    let tree = resolver.build_tree(component);
    let flat = flatten(&tree);

    if json {
        let value = serde_json::json!({
            "tree": tree,
            "components": flat.components,
            "packages": flat.packages,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_tree(&tree, 0);
    println!();
    let packages: Vec<String> = flat.packages.iter().map(|p| p.name.clone()).collect();
    println!("Components: {}", or_none(&flat.components));
    println!("Packages:   {}", or_none(&packages));
    Ok(())
}
