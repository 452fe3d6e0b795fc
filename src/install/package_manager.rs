// src/install/package_manager.rs

//! Package manager detection and invocation

use crate::error::{Error, Result};
use crate::project::PackageManifest;
use std::env;
use std::path::Path;
use std::process::Command;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, info};

/// JavaScript package managers the installer knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Lockfiles that identify each manager, checked in this order
    const LOCKFILES: &'static [(&'static str, PackageManager)] = &[
        ("bun.lockb", PackageManager::Bun),
        ("bun.lock", PackageManager::Bun),
        ("pnpm-lock.yaml", PackageManager::Pnpm),
        ("yarn.lock", PackageManager::Yarn),
        ("package-lock.json", PackageManager::Npm),
    ];

    /// Detect the manager used by a project
    ///
    /// Lockfile first, then the manifest's `packageManager` field, then the
    /// `npm_config_user_agent` of the invoking process, defaulting to npm.
    pub fn detect(project_root: &Path, manifest: Option<&PackageManifest>) -> Self {
        for (file, manager) in Self::LOCKFILES {
            if project_root.join(file).is_file() {
                debug!("Detected {} from {}", manager, file);
                return *manager;
            }
        }

        if let Some(manager) = manifest
            .and_then(|m| m.package_manager.as_deref())
            .and_then(Self::from_spec)
        {
            debug!("Detected {} from packageManager field", manager);
            return manager;
        }

        if let Some(manager) = env::var("npm_config_user_agent")
            .ok()
            .as_deref()
            .and_then(Self::from_spec)
        {
            debug!("Detected {} from npm_config_user_agent", manager);
            return manager;
        }

        PackageManager::Npm
    }

    /// Parse `pnpm@9.1.0` or a user agent like `yarn/1.22.19 npm/? node/v20`
    pub fn from_spec(spec: &str) -> Option<Self> {
        let name = spec.split(['@', '/']).next()?.trim();
        name.parse().ok()
    }

    /// Program name to spawn
    pub fn program(&self) -> &str {
        self.as_ref()
    }

    /// Arguments that add the given packages
    pub fn add_args(&self, packages: &[String]) -> Vec<String> {
        let verb = match self {
            PackageManager::Npm => "install",
            PackageManager::Pnpm | PackageManager::Yarn | PackageManager::Bun => "add",
        };
        std::iter::once(verb.to_string())
            .chain(packages.iter().cloned())
            .collect()
    }
}

/// Adds packages to a project
pub trait PackageInstaller {
    fn install(&self, project_root: &Path, packages: &[String]) -> Result<()>;
}

/// Runs the detected package manager as a child process
///
/// The child inherits stdio so the operator sees the manager's own output.
#[derive(Debug, Clone)]
pub struct CommandPackageInstaller {
    manager: PackageManager,
}

impl CommandPackageInstaller {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }
}

impl PackageInstaller for CommandPackageInstaller {
    fn install(&self, project_root: &Path, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let program = self.manager.program();
        let args = self.manager.add_args(packages);
        info!("Running {} {}", program, args.join(" "));

        let status = Command::new(program)
            .args(&args)
            .current_dir(project_root)
            .status()
            .map_err(|e| Error::PackageManager(format!("failed to spawn '{}': {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::PackageManager(format!(
                "'{} {}' exited with code {}",
                program,
                args.join(" "),
                status.code().unwrap_or(-1)
            )))
        }
    }
}
