// src/commands/mod.rs
//! Command handlers for the solder CLI

mod add;
mod deps;
mod diff;
mod init;
mod list;
mod progress;

pub use add::cmd_add;
pub use deps::cmd_deps;
pub use diff::cmd_diff;
pub use init::cmd_init;
pub use list::cmd_list;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use solder::{ComponentLibrary, ProjectConfig, ProjectState, Registry, ScanConfig};
use std::io;
use std::path::Path;

/// Library handles shared by the commands that read components
pub(crate) struct Workspace {
    pub library: ComponentLibrary,
    pub registry: Option<Registry>,
    pub scan: ScanConfig,
}

impl Workspace {
    pub fn open(library_root: &Path) -> Result<Self> {
        let scan = ScanConfig::default();
        let library = ComponentLibrary::new(library_root, &scan.source_extensions);
        if !library.components_dir().is_dir() {
            anyhow::bail!(
                "No component library at {} (expected a components/ directory; set --library or SOLDER_LIBRARY)",
                library_root.display()
            );
        }
        let registry = library.registry();
        Ok(Self {
            library,
            registry,
            scan,
        })
    }
}

/// Load `components.json` and the project state it describes
pub(crate) fn open_project(root: &Path, scan: &ScanConfig) -> Result<(ProjectConfig, ProjectState)> {
    let config = ProjectConfig::load(root)?;
    let project = ProjectState::load(root, config.components_dir_in(root), &scan.source_extensions);
    Ok((config, project))
}

/// Generate shell completions
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = crate::cli::Cli::command();
    clap_complete::generate(shell, &mut cmd, "solder", &mut io::stdout());
    Ok(())
}

pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
