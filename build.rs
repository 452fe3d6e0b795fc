// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: component name
fn component_arg() -> Arg {
    Arg::new("component").required(true).help("Component name")
}

fn build_cli() -> Command {
    Command::new("solder")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Solder Contributors")
        .about("Copy UI components into your project, dependencies included")
        .subcommand_required(true)
        .arg(
            Arg::new("library")
                .long("library")
                .value_name("DIR")
                .env("SOLDER_LIBRARY")
                .default_value(".")
                .global(true)
                .help("Component library root (contains components/ and registry.json)"),
        )
        .arg(
            Arg::new("cwd")
                .long("cwd")
                .value_name("DIR")
                .default_value(".")
                .global(true)
                .help("Project root to operate on"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("init")
                .about("Write components.json for the project")
                .arg(
                    Arg::new("components_dir")
                        .long("components-dir")
                        .default_value("src/components/ui")
                        .help("Directory that receives installed components"),
                )
                .arg(
                    Arg::new("icon_library")
                        .long("icon-library")
                        .default_value("lucide")
                        .help("Icon library used by the project"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Replace an existing components.json (a backup is kept)"),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Install components and everything they depend on")
                .arg(
                    Arg::new("components")
                        .required(true)
                        .num_args(1..)
                        .help("Component names"),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Answer yes to every prompt"),
                )
                .arg(
                    Arg::new("overwrite")
                        .long("overwrite")
                        .action(ArgAction::SetTrue)
                        .help("Replace existing component files without asking"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would be installed without making changes"),
                ),
        )
        .subcommand(Command::new("list").about("List library components, marking installed ones"))
        .subcommand(
            Command::new("deps")
                .about("Show the dependency tree of a component")
                .arg(component_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON instead of a tree"),
                ),
        )
        .subcommand(
            Command::new("diff")
                .about("Diff an installed component against the library version")
                .arg(component_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Shell to generate completions for")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("solder.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
