// src/commands/diff.rs
//! `solder diff`: installed file vs freshly transformed library source

use super::{display_path, open_project, Workspace};
use anyhow::{Context, Result};
use solder::{Error, SourceTransformer, TransformConfig};
use std::fs;
use std::path::Path;

pub fn cmd_diff(library_root: &Path, root: &Path, component: &str) -> Result<()> {
    let workspace = Workspace::open(library_root)?;
    let (config, project) = open_project(root, &workspace.scan)?;

    let Some((_, source)) = workspace.library.read_source(component) else {
        return Err(Error::ComponentNotFound(component.to_string()).into());
    };
    let Some(installed_path) = project.installed_component_path(component) else {
        anyhow::bail!(
            "{} is not installed in {}",
            component,
            project.components_dir().display()
        );
    };

    let installed = fs::read_to_string(&installed_path)
        .with_context(|| format!("Failed to read {}", installed_path.display()))?;
    let transformer = SourceTransformer::new(TransformConfig::for_project(&config))?;
    let fresh = transformer.transform(&source);

    if installed == fresh {
        println!("{} is up to date", component);
        return Ok(());
    }

    let name = display_path(root, &installed_path);
    let patch = diffy::create_patch(&installed, &fresh);
    let formatted = patch.to_string();
    // diffy labels files "original"/"modified"; relabel with the path
    let formatted = formatted
        .replacen("--- original", &format!("--- {} (installed)", name), 1)
        .replacen("+++ modified", &format!("+++ {} (library)", name), 1);
    print!("{}", formatted);
    Ok(())
}
