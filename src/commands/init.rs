// src/commands/init.rs
//! `solder init`: write components.json

use anyhow::{Context, Result};
use solder::install::fs::{backup_file, write_file};
use solder::{Error, ProjectConfig};
use std::path::Path;
use tracing::info;

pub fn cmd_init(root: &Path, components_dir: &str, icon_library: &str, force: bool) -> Result<()> {
    let path = ProjectConfig::path_in(root);

    if path.exists() {
        if !force {
            return Err(Error::AlreadyInitialized(path).into());
        }
        let backup = backup_file(&path)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        println!("Backed up existing config to {}", backup.display());
    }

    let config = ProjectConfig {
        components_dir: components_dir.to_string(),
        icon_library: icon_library.to_string(),
    };
    write_file(&path, &config.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());

    println!("Initialized {}", path.display());
    println!("  Components directory: {}", config.components_dir);
    println!("  Icon library:         {}", config.icon_library);
    Ok(())
}
