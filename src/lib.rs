// src/lib.rs

//! Solder: copy-in component installer
//!
//! Installs UI components into a project by copying their source rather
//! than adding a package dependency. Each component's imports are scanned to
//! discover the components and packages it needs, the dependency tree is
//! resolved against the target project, and every source is rewritten
//! before it is written.
//!
//! # Architecture
//!
//! - `scanner`: import statements → component and package dependencies
//! - `resolver`: dependency trees with a curated registry ahead of scanning
//! - `project`: what the target project already has installed
//! - `transform`: source rewriting and sanity checks
//! - `install`: the batch orchestrator and its external seams

pub mod config;
mod error;
pub mod install;
pub mod library;
pub mod project;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod transform;

pub use config::{ProjectConfig, ScanConfig, TransformConfig};
pub use error::{Error, Result};
pub use install::{InstallOptions, InstallationPlan, InstallationResult, Installer};
pub use library::ComponentLibrary;
pub use project::{PackageManifest, ProjectState, ResolutionState};
pub use registry::Registry;
pub use resolver::{flatten, DependencyResolver, DependencyTree, FlatDependencies};
pub use scanner::{scan_file, scan_source, ComponentDependency, PackageDependency, ScanResult};
pub use transform::{validate_source, SourceTransformer};
