// src/commands/list.rs
//! `solder list`: library components and their install status

use super::{open_project, Workspace};
use anyhow::Result;
use solder::Error;
use std::path::Path;

pub fn cmd_list(library_root: &Path, root: &Path) -> Result<()> {
    let workspace = Workspace::open(library_root)?;

    // An uninitialized project just means nothing is marked installed
    let project = match open_project(root, &workspace.scan) {
        Ok((_, project)) => Some(project),
        Err(e) if matches!(e.downcast_ref::<Error>(), Some(Error::NotInitialized(_))) => None,
        Err(e) => return Err(e),
    };

    let names = workspace.library.component_names();
    if names.is_empty() {
        println!("No components found in {}", workspace.library.components_dir().display());
        return Ok(());
    }

    let mut installed = 0;
    for name in &names {
        if project.as_ref().is_some_and(|p| p.is_component_installed(name)) {
            installed += 1;
            println!("  {} [installed]", name);
        } else {
            println!("  {}", name);
        }
    }
    println!();
    println!("{} component(s), {} installed", names.len(), installed);
    Ok(())
}
