// tests/common/mod.rs

//! Shared fixtures and test doubles for integration tests.

#![allow(dead_code)]

use solder::install::{
    Confirmation, FormatOutcome, PackageInstaller, Prompter, SourceFormatter,
};
use solder::{ComponentLibrary, Error, ProjectConfig, ProjectState, ScanConfig};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BUTTON: &str = r#"import type { ComponentMeta } from "~/lib/meta";
import { cn } from "~/lib/utils";
import { Button as ButtonPrimitive } from "@kobalte/core/button";
import { splitProps } from "solid-js";

export function Button(props) {
  const [local, rest] = splitProps(props, ["class"]);
  return <ButtonPrimitive class={cn("btn", local.class)} {...rest} />;
}

// Examples
import { Badge } from "./badge";

export const meta: ComponentMeta<typeof Button> = {
  name: "Button",
  examples: [{ title: "With badge", code: () => <Button><Badge /></Button> }],
};
"#;

pub const BADGE: &str = r#"import { cn } from "~/lib/utils";

export function Badge(props) {
  return <span class={cn("badge", props.class)}>{props.children}</span>;
}
"#;

pub const DIALOG: &str = r#"import { cn } from "~/lib/utils";
import { Dialog as DialogPrimitive } from "@kobalte/core/dialog";
import IconX from "~icons/lucide/x";
import { Button } from "./button";

export function Dialog(props) {
  return (
    <DialogPrimitive {...props}>
      <Button class={cn("close")}><IconX /></Button>
    </DialogPrimitive>
  );
}
"#;

/// A temporary component library and consumer project side by side
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("library/components")).unwrap();
        fs::create_dir_all(dir.path().join("project")).unwrap();
        Self { dir }
    }

    /// Library with button, badge and dialog
    pub fn standard() -> Self {
        let fixture = Self::new();
        fixture.add_component("button", BUTTON);
        fixture.add_component("badge", BADGE);
        fixture.add_component("dialog", DIALOG);
        fixture
    }

    pub fn library_root(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    pub fn project_root(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn add_component(&self, name: &str, source: &str) {
        let path = self.library_root().join("components").join(format!("{}.tsx", name));
        fs::write(path, source).unwrap();
    }

    pub fn write_registry(&self, json: &str) {
        fs::write(self.library_root().join("registry.json"), json).unwrap();
    }

    /// Write components.json and a package.json listing `packages`
    pub fn init_project(&self, packages: &[&str]) {
        let root = self.project_root();
        fs::write(
            ProjectConfig::path_in(&root),
            ProjectConfig::default().to_json().unwrap(),
        )
        .unwrap();

        let deps: Vec<String> = packages
            .iter()
            .map(|p| format!("\"{}\": \"*\"", p))
            .collect();
        fs::write(
            root.join("package.json"),
            format!("{{ \"name\": \"app\", \"dependencies\": {{ {} }} }}", deps.join(", ")),
        )
        .unwrap();
    }

    pub fn install_component_file(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.components_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.tsx", name));
        fs::write(&path, content).unwrap();
        path
    }

    pub fn components_dir(&self) -> PathBuf {
        ProjectConfig::default().components_dir_in(&self.project_root())
    }

    pub fn library(&self) -> ComponentLibrary {
        ComponentLibrary::new(self.library_root(), &ScanConfig::default().source_extensions)
    }

    pub fn project(&self) -> ProjectState {
        let root = self.project_root();
        let config = ProjectConfig::load(&root).unwrap();
        ProjectState::load(
            &root,
            config.components_dir_in(&root),
            &ScanConfig::default().source_extensions,
        )
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Answers prompts from a script, recording every question
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Confirmation>>,
    pub questions: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[Confirmation]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            questions: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, _default: bool) -> solder::Result<Confirmation> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(Confirmation::Cancelled))
    }
}

/// Records package installs instead of running a package manager
#[derive(Default)]
pub struct RecordingInstaller {
    pub calls: RefCell<Vec<Vec<String>>>,
    pub fail: bool,
}

impl RecordingInstaller {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, _project_root: &Path, packages: &[String]) -> solder::Result<()> {
        self.calls.borrow_mut().push(packages.to_vec());
        if self.fail {
            return Err(Error::PackageManager("npm install exited with code 1".to_string()));
        }
        Ok(())
    }
}

/// Formatter that always fails, recording the files it was given
#[derive(Default)]
pub struct FailingFormatter {
    pub files: RefCell<Vec<PathBuf>>,
}

impl SourceFormatter for FailingFormatter {
    fn format(&self, _project_root: &Path, file: &Path) -> FormatOutcome {
        self.files.borrow_mut().push(file.to_path_buf());
        FormatOutcome::Failed("prettier exploded".to_string())
    }
}
