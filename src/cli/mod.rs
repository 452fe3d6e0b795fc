// src/cli/mod.rs
//! CLI definitions for solder
//!
//! Command implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use solder::config::{CANONICAL_ICON_LIBRARY, DEFAULT_COMPONENTS_DIR};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solder")]
#[command(version)]
#[command(about = "Copy UI components into your project, dependencies included", long_about = None)]
pub struct Cli {
    /// Component library root (contains `components/` and `registry.json`)
    #[arg(long, global = true, env = "SOLDER_LIBRARY", default_value = ".")]
    pub library: PathBuf,

    /// Project root to operate on
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write components.json for the project
    Init {
        /// Directory that receives installed components
        #[arg(long, default_value = DEFAULT_COMPONENTS_DIR)]
        components_dir: String,

        /// Icon library used by the project
        #[arg(long, default_value = CANONICAL_ICON_LIBRARY)]
        icon_library: String,

        /// Replace an existing components.json (a backup is kept)
        #[arg(long)]
        force: bool,
    },

    /// Install components and everything they depend on
    Add {
        /// Component names
        #[arg(required = true)]
        components: Vec<String>,

        /// Answer yes to every prompt
        #[arg(short, long)]
        yes: bool,

        /// Replace existing component files without asking
        #[arg(long)]
        overwrite: bool,

        /// Show what would be installed without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// List library components, marking installed ones
    List,

    /// Show the dependency tree of a component
    Deps {
        /// Component name
        component: String,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Diff an installed component against the library version
    Diff {
        /// Component name
        component: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
