// src/commands/add.rs
//! `solder add`: install components and their dependencies

use super::progress::Spinner;
use super::{display_path, open_project, Workspace};
use anyhow::Result;
use solder::install::{
    AssumeYes, CommandPackageInstaller, PackageManager, PrettierFormatter, Prompter,
    TerminalPrompter,
};
use solder::{
    DependencyResolver, InstallOptions, InstallationPlan, Installer, SourceTransformer,
    TransformConfig,
};
use std::path::Path;

fn print_plan(plan: &InstallationPlan, manager: PackageManager) {
    println!("Components to install:");
    for name in &plan.components {
        let marker = if plan.requested.contains(name) { "" } else { " (dependency)" };
        println!("  {}{}", name, marker);
    }
    if !plan.packages.is_empty() {
        println!("Packages to add with {}:", manager);
        for package in &plan.packages {
            println!("  {}", package.name);
        }
    }
    if !plan.installed_components.is_empty() {
        println!("Already installed: {}", plan.installed_components.join(", "));
    }
}

pub fn cmd_add(
    library_root: &Path,
    root: &Path,
    components: &[String],
    yes: bool,
    overwrite: bool,
    dry_run: bool,
) -> Result<()> {
    let workspace = Workspace::open(library_root)?;
    let (config, project) = open_project(root, &workspace.scan)?;

    let resolver = DependencyResolver::new(&workspace.library, &workspace.scan)
        .with_registry(workspace.registry.as_ref());
    let transformer = SourceTransformer::new(TransformConfig::for_project(&config))?;
    let manager = PackageManager::detect(root, project.manifest());
    let packages = CommandPackageInstaller::new(manager);
    let formatter = PrettierFormatter::default();
    let prompter: &dyn Prompter = if yes { &AssumeYes } else { &TerminalPrompter };

    let installer = Installer::new(
        &workspace.library,
        &resolver,
        &project,
        &transformer,
        prompter,
        &packages,
        &formatter,
        InstallOptions { overwrite },
    );

    let spinner = Spinner::new("Resolving dependencies...");
    let plan = installer.plan(components);
    spinner.finish();
    let plan = plan?;

    print_plan(&plan, manager);
    if dry_run {
        println!();
        println!("Dry run: nothing was changed.");
        return Ok(());
    }

    let result = installer.execute(&plan)?;

    println!();
    for name in &result.installed_components {
        match installer.target_path(name) {
            Some(path) => println!("Installed {} ({})", name, display_path(root, &path)),
            None => println!("Installed {}", name),
        }
    }
    if !result.installed_packages.is_empty() {
        println!("Added packages: {}", result.installed_packages.join(", "));
    }
    if !result.success {
        for error in &result.errors {
            eprintln!("  {}", error);
        }
        anyhow::bail!("Installation finished with {} error(s)", result.errors.len());
    }
    Ok(())
}
