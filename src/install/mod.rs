// src/install/mod.rs

//! Install orchestration
//!
//! The installer runs a batch in phases:
//!
//! 1. **Plan**: resolve every requested component and partition the result
//!    against the project
//! 2. **Confirm**: ask before installing anything the operator did not name
//! 3. **Packages**: one package manager invocation for all missing packages;
//!    a failure is recorded and ends the run before any component is written
//! 4. **Components**: dependencies first, then the requested components, each
//!    transformed, validated, written and formatted
//!
//! One failing component does not stop the others. Cancelling a prompt stops
//! the run with [`Error::Cancelled`].

mod formatter;
pub mod fs;
mod package_manager;
mod prompt;

pub use formatter::{
    FormatOutcome, NoopFormatter, PrettierFormatter, SourceFormatter, DEFAULT_FORMAT_TIMEOUT,
};
pub use package_manager::{CommandPackageInstaller, PackageInstaller, PackageManager};
pub use prompt::{AssumeYes, Confirmation, Prompter, TerminalPrompter};

use crate::error::{Error, Result};
use crate::library::ComponentLibrary;
use crate::project::{ProjectState, ResolutionState};
use crate::resolver::DependencyResolver;
use crate::scanner::PackageDependency;
use crate::transform::{validate_source, SourceTransformer};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Behaviour switches for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Replace existing component files without asking
    pub overwrite: bool,
}

/// What a batch will install, in install order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationPlan {
    pub requested: Vec<String>,
    /// Missing dependency components followed by the requested ones
    pub components: Vec<String>,
    /// Packages absent from the project manifest
    pub packages: Vec<PackageDependency>,
    pub installed_components: Vec<String>,
    pub installed_packages: Vec<PackageDependency>,
}

impl InstallationPlan {
    pub fn from_state(requested: &[String], state: ResolutionState) -> Self {
        let mut components: Vec<String> = Vec::new();
        for name in state.missing_components.iter().chain(requested) {
            if !components.contains(name) {
                components.push(name.clone());
            }
        }

        Self {
            requested: requested.to_vec(),
            components,
            packages: state.missing_packages,
            installed_components: state.installed_components,
            installed_packages: state.installed_packages,
        }
    }

    /// Components that will be installed without being asked for
    pub fn dependency_components(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|c| !self.requested.contains(*c))
            .map(String::as_str)
            .collect()
    }

    /// Whether anything beyond the requested components gets installed
    pub fn has_any_dependencies(&self) -> bool {
        !self.packages.is_empty() || !self.dependency_components().is_empty()
    }

    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }
}

/// Outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationResult {
    /// True only when no errors were recorded
    pub success: bool,
    /// Names of the components written, in install order
    pub installed_components: Vec<String>,
    pub installed_packages: Vec<String>,
    pub errors: Vec<String>,
}

impl InstallationResult {
    fn finish(mut self) -> Self {
        self.success = self.errors.is_empty();
        self
    }
}

/// Drives a batch installation into one project
pub struct Installer<'a> {
    library: &'a ComponentLibrary,
    resolver: &'a DependencyResolver<'a>,
    project: &'a ProjectState,
    transformer: &'a SourceTransformer,
    prompter: &'a dyn Prompter,
    packages: &'a dyn PackageInstaller,
    formatter: &'a dyn SourceFormatter,
    options: InstallOptions,
}

impl<'a> Installer<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        library: &'a ComponentLibrary,
        resolver: &'a DependencyResolver<'a>,
        project: &'a ProjectState,
        transformer: &'a SourceTransformer,
        prompter: &'a dyn Prompter,
        packages: &'a dyn PackageInstaller,
        formatter: &'a dyn SourceFormatter,
        options: InstallOptions,
    ) -> Self {
        Self {
            library,
            resolver,
            project,
            transformer,
            prompter,
            packages,
            formatter,
            options,
        }
    }

    /// Resolve the batch without touching the project
    ///
    /// Fails with [`Error::ComponentNotFound`] for names the library lacks.
    pub fn plan(&self, requested: &[String]) -> Result<InstallationPlan> {
        for name in requested {
            if self.library.locate(name).is_none() {
                return Err(Error::ComponentNotFound(name.clone()));
            }
        }
        let state = self.project.missing_dependencies(requested, self.resolver);
        Ok(InstallationPlan::from_state(requested, state))
    }

    /// Plan and execute a batch
    pub fn install(&self, requested: &[String]) -> Result<InstallationResult> {
        let plan = self.plan(requested)?;
        self.execute(&plan)
    }

    /// Execute a previously computed plan
    pub fn execute(&self, plan: &InstallationPlan) -> Result<InstallationResult> {
        let mut result = InstallationResult::default();

        if plan.has_any_dependencies() {
            let question = format!(
                "Install {} dependent component(s) and {} package(s)?",
                plan.dependency_components().len(),
                plan.packages.len()
            );
            match self.prompter.confirm(&question, true)? {
                Confirmation::Yes => {}
                Confirmation::No => {
                    result.errors.push("Installation declined".to_string());
                    return Ok(result.finish());
                }
                Confirmation::Cancelled => return Err(Error::Cancelled),
            }
        }

        let package_names = plan.package_names();
        if !package_names.is_empty() {
            info!("Installing {} package(s)", package_names.len());
            if let Err(e) = self.packages.install(self.project.root(), &package_names) {
                warn!("Package installation failed: {}", e);
                result.errors.push(e.to_string());
                return Ok(result.finish());
            }
            result.installed_packages = package_names;
        }

        for name in &plan.components {
            match self.install_component(name)? {
                Ok(()) => result.installed_components.push(name.clone()),
                Err(message) => {
                    warn!("{}", message);
                    result.errors.push(message);
                }
            }
        }

        Ok(result.finish())
    }

    /// Install one component
    ///
    /// The outer `Result` carries run-aborting errors (cancellation); the
    /// inner one a per-component failure message.
    fn install_component(&self, name: &str) -> Result<std::result::Result<(), String>> {
        let Some((source_path, source)) = self.library.read_source(name) else {
            return Ok(Err(format!("{}: source not found in library", name)));
        };

        let transformed = self.transformer.transform(&source);
        let problems = validate_source(&transformed);
        if !problems.is_empty() {
            return Ok(Err(format!("{}: validation failed: {}", name, problems.join("; "))));
        }

        let file_name = match source_path.file_name() {
            Some(file_name) => file_name.to_owned(),
            None => return Ok(Err(format!("{}: invalid source path", name))),
        };
        let target = self.project.components_dir().join(file_name);

        if target.exists() && !self.options.overwrite {
            let question = format!("{} already exists. Overwrite?", target.display());
            match self.prompter.confirm(&question, false)? {
                Confirmation::Yes => {}
                Confirmation::No => {
                    return Ok(Err(format!("{}: not overwritten ({})", name, target.display())));
                }
                Confirmation::Cancelled => return Err(Error::Cancelled),
            }
        }

        if let Err(e) = fs::write_file(&target, &transformed) {
            return Ok(Err(format!("{}: failed to write {}: {}", name, target.display(), e)));
        }
        info!("Installed {} to {}", name, target.display());

        let outcome = self.formatter.format(self.project.root(), &target);
        debug!("Formatting {}: {:?}", target.display(), outcome);

        Ok(Ok(()))
    }

    /// Where a component's file lands in the project
    pub fn target_path(&self, name: &str) -> Option<PathBuf> {
        let source_path = self.library.locate(name)?;
        Some(self.project.components_dir().join(source_path.file_name()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(missing: &[&str]) -> ResolutionState {
        ResolutionState {
            missing_components: missing.iter().map(|s| s.to_string()).collect(),
            ..ResolutionState::default()
        }
    }

    #[test]
    fn test_plan_orders_dependencies_first_without_duplicates() {
        let requested = vec!["a".to_string(), "b".to_string()];
        let plan = InstallationPlan::from_state(&requested, state(&["b", "c"]));

        assert_eq!(plan.components, vec!["b", "c", "a"]);
        assert_eq!(plan.dependency_components(), vec!["c"]);
        assert!(plan.has_any_dependencies());
    }

    #[test]
    fn test_plan_without_dependencies() {
        let requested = vec!["a".to_string()];
        let plan = InstallationPlan::from_state(&requested, state(&[]));
        assert_eq!(plan.components, vec!["a"]);
        assert!(!plan.has_any_dependencies());
    }

    #[test]
    fn test_result_success_tracks_errors() {
        let ok = InstallationResult::default().finish();
        assert!(ok.success);

        let failed = InstallationResult {
            errors: vec!["x".to_string()],
            ..InstallationResult::default()
        }
        .finish();
        assert!(!failed.success);
    }
}
