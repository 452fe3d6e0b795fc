// src/scanner.rs

//! Import scanning for component sources
//!
//! Component sources are hand-authored in a constrained style, so imports are
//! recognised with regular expressions rather than a full parser. All pattern
//! matching lives behind [`scan_imports`]; everything downstream works on
//! [`ImportStatement`] values.
//!
//! Known limitation: an import whose clause contains quote characters or
//! semicolons (for example inside a trailing comment between the braces) is
//! not matched and is silently ignored.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static STATIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s+(type\s+)?([^;"'`]*?)\s*\bfrom\s*["']([^"'\n]+)["']"#)
        .unwrap()
});

static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^[ \t]*import\s*["']([^"'\n]+)["']"#).unwrap());

static DYNAMIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*["']([^"'\n]+)["']\s*\)"#).unwrap()
});

/// A reference from one component source to another via a relative import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDependency {
    pub name: String,
    pub path: String,
}

/// A reference to an externally installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDependency {
    pub name: String,
    /// Every distinct binding imported from the package
    pub imports: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_installed: Option<bool>,
}

impl PackageDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: BTreeSet::new(),
            is_installed: None,
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    /// Union another reference to the same package into this one
    pub fn merge(&mut self, other: &PackageDependency) {
        self.imports.extend(other.imports.iter().cloned());
    }
}

/// How an import statement is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import ... from "x"`; `type_only` for `import type ...`
    Static { type_only: bool },
    /// `import "x"`
    SideEffect,
    /// `import("x")`
    Dynamic,
}

/// A single named binding inside `{ ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub imported: String,
    pub local: String,
    /// Inline `type` modifier (`{ type Foo }`)
    pub type_only: bool,
}

/// Local bindings introduced by an import clause
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBindings {
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<NamedImport>,
}

impl ImportBindings {
    /// All local identifiers, in clause order
    pub fn locals(&self) -> Vec<&str> {
        let mut locals = Vec::new();
        if let Some(default) = &self.default {
            locals.push(default.as_str());
        }
        if let Some(namespace) = &self.namespace {
            locals.push(namespace.as_str());
        }
        locals.extend(self.named.iter().map(|n| n.local.as_str()));
        locals
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }
}

/// One recognised import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub source: String,
    pub kind: ImportKind,
    pub bindings: ImportBindings,
    /// Byte offset of the match in the scanned text
    pub offset: usize,
}

/// Dependencies referenced by one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub components: Vec<ComponentDependency>,
    pub packages: Vec<PackageDependency>,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn parse_named(inner: &str) -> Vec<NamedImport> {
    inner
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            let (type_only, part) = match part.strip_prefix("type ") {
                Some(rest) => (true, rest.trim()),
                None => (false, part),
            };
            let mut pieces = part.split_whitespace();
            let imported = pieces.next()?;
            let local = match (pieces.next(), pieces.next()) {
                (Some("as"), Some(alias)) => alias,
                (None, _) => imported,
                _ => return None,
            };
            if !is_identifier(local) {
                return None;
            }
            Some(NamedImport {
                imported: imported.to_string(),
                local: local.to_string(),
                type_only,
            })
        })
        .collect()
}

/// Parse the clause between `import` and `from`
///
/// Handles `Default`, `{ a, b as c }`, `* as ns` and the mixed forms
/// `Default, { ... }` / `Default, * as ns`.
pub fn parse_import_clause(clause: &str) -> ImportBindings {
    let clause = clause.trim();
    let mut bindings = ImportBindings::default();

    let (head, named) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => {
            (&clause[..open], Some(&clause[open + 1..close]))
        }
        _ => (clause, None),
    };
    if let Some(inner) = named {
        bindings.named = parse_named(inner);
    }

    for part in head.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(rest) = part.strip_prefix('*') {
            let alias = rest.trim().strip_prefix("as").map(str::trim);
            if let Some(alias) = alias.filter(|a| is_identifier(a)) {
                bindings.namespace = Some(alias.to_string());
            }
        } else if is_identifier(part) {
            bindings.default = Some(part.to_string());
        }
    }

    bindings
}

/// Extract every import statement from source text, in source order
pub fn scan_imports(source: &str) -> Vec<ImportStatement> {
    let mut statements = Vec::new();

    for caps in STATIC_IMPORT_RE.captures_iter(source) {
        let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
        statements.push(ImportStatement {
            source: caps[3].to_string(),
            kind: ImportKind::Static {
                type_only: caps.get(1).is_some(),
            },
            bindings: parse_import_clause(&caps[2]),
            offset: whole,
        });
    }

    for caps in SIDE_EFFECT_IMPORT_RE.captures_iter(source) {
        statements.push(ImportStatement {
            source: caps[1].to_string(),
            kind: ImportKind::SideEffect,
            bindings: ImportBindings::default(),
            offset: caps.get(0).map(|m| m.start()).unwrap_or(0),
        });
    }

    for caps in DYNAMIC_IMPORT_RE.captures_iter(source) {
        statements.push(ImportStatement {
            source: caps[1].to_string(),
            kind: ImportKind::Dynamic,
            bindings: ImportBindings::default(),
            offset: caps.get(0).map(|m| m.start()).unwrap_or(0),
        });
    }

    statements.sort_by_key(|s| s.offset);
    statements
}

/// Root package name of an import source
///
/// `@scope/pkg/sub` → `@scope/pkg`, `pkg/sub` → `pkg`.
pub fn package_root_name(source: &str) -> String {
    let mut segments = source.split('/');
    let first = segments.next().unwrap_or_default();
    if first.starts_with('@') {
        match segments.next() {
            Some(second) => format!("{}/{}", first, second),
            None => first.to_string(),
        }
    } else {
        first.to_string()
    }
}

fn strip_source_extension<'a>(file: &'a str, config: &ScanConfig) -> &'a str {
    config
        .source_extensions
        .iter()
        .find_map(|ext| file.strip_suffix(ext.as_str()))
        .unwrap_or(file)
}

/// Component dependency for a relative import, unless it is filtered
fn component_dependency(path: &str, config: &ScanConfig) -> Option<ComponentDependency> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    let file = segments.last()?;
    let name = strip_source_extension(file, config);
    if name.is_empty() || config.is_ignored(name) {
        return None;
    }

    let directories = &segments[..segments.len() - 1];
    let is_utility = directories
        .iter()
        .chain(std::iter::once(&name))
        .any(|segment| config.utility_path_names.iter().any(|u| u.as_str() == *segment));
    if is_utility {
        debug!("Skipping utility import {}", path);
        return None;
    }

    Some(ComponentDependency {
        name: name.to_string(),
        path: path.to_string(),
    })
}

fn is_package_source(source: &str, config: &ScanConfig) -> bool {
    !source.starts_with('.') && !source.starts_with('/') && !config.is_virtual_module(source)
}

/// Classify the imports of a source text into component and package
/// dependencies
pub fn scan_source(source: &str, config: &ScanConfig) -> ScanResult {
    let mut result = ScanResult::default();

    for statement in scan_imports(source) {
        let src = statement.source.as_str();

        if src.starts_with("./") || src.starts_with("../") {
            if let Some(dep) = component_dependency(src, config)
                && !result.components.iter().any(|c| c.name == dep.name)
            {
                result.components.push(dep);
            }
            continue;
        }

        if !is_package_source(src, config) {
            continue;
        }

        let locals = statement.bindings.locals();
        let imports: Vec<&str> = locals
            .iter()
            .copied()
            .filter(|local| !config.is_ignored(local))
            .collect();
        if !locals.is_empty() && imports.is_empty() {
            // Only ignored bindings (e.g. the inlined utility): no reference
            continue;
        }

        let name = package_root_name(src);
        match result.packages.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.imports.extend(imports.iter().map(|s| s.to_string())),
            None => result
                .packages
                .push(PackageDependency::new(name).with_imports(imports)),
        }
    }

    result
}

/// Scan a source file on disk
pub fn scan_file(path: &Path, config: &ScanConfig) -> Result<ScanResult> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(scan_source(&source, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> ScanResult {
        scan_source(source, &ScanConfig::default())
    }

    fn package<'a>(result: &'a ScanResult, name: &str) -> &'a PackageDependency {
        result
            .packages
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("package {} not found", name))
    }

    #[test]
    fn test_scoped_and_default_packages() {
        let result = scan(
            r#"import { Foo, Bar as Baz } from "@scope/pkg"; import Qux from "pkg2";"#,
        );
        assert_eq!(result.packages.len(), 2);
        assert_eq!(
            package(&result, "@scope/pkg").imports,
            BTreeSet::from(["Foo".to_string(), "Baz".to_string()])
        );
        assert_eq!(
            package(&result, "pkg2").imports,
            BTreeSet::from(["Qux".to_string()])
        );
    }

    #[test]
    fn test_relative_component_import() {
        let result = scan(r#"import Button from "./button.tsx";"#);
        assert_eq!(
            result.components,
            vec![ComponentDependency {
                name: "button".to_string(),
                path: "./button.tsx".to_string(),
            }]
        );
        assert!(result.packages.is_empty());
    }

    #[test]
    fn test_utility_paths_are_dropped() {
        let result = scan(
            r#"
import { cn } from "../lib/utils";
import { helper } from "./helpers/format";
import { thing } from "./util";
import { Dialog } from "../dialog";
"#,
        );
        let names: Vec<_> = result.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["dialog"]);
    }

    #[test]
    fn test_ignore_list_name_is_dropped() {
        let result = scan(r#"import { cn } from "./cn";"#);
        assert!(result.components.is_empty());
    }

    #[test]
    fn test_packages_merge_across_statements() {
        let result = scan(
            r#"
import { createSignal } from "solid-js";
import type { JSX } from "solid-js";
import { Show, createSignal as signal } from "solid-js";
import { Portal } from "solid-js/web";
"#,
        );
        assert_eq!(result.packages.len(), 1);
        let imports: Vec<_> = package(&result, "solid-js").imports.iter().cloned().collect();
        assert_eq!(imports, vec!["JSX", "Portal", "Show", "createSignal", "signal"]);
    }

    #[test]
    fn test_namespace_and_mixed_clauses() {
        let bindings = parse_import_clause("React, * as All");
        assert_eq!(bindings.default.as_deref(), Some("React"));
        assert_eq!(bindings.namespace.as_deref(), Some("All"));

        let bindings = parse_import_clause("Def, { a, type B, c as d }");
        assert_eq!(bindings.default.as_deref(), Some("Def"));
        assert_eq!(bindings.locals(), vec!["Def", "a", "B", "d"]);
        assert!(bindings.named[1].type_only);
        assert_eq!(bindings.named[2].imported, "c");
    }

    #[test]
    fn test_multiline_named_import() {
        let result = scan(
            "import {\n  Root,\n  Trigger as DialogTrigger,\n} from \"@kobalte/core/dialog\";\n",
        );
        assert_eq!(
            package(&result, "@kobalte/core").imports,
            BTreeSet::from(["Root".to_string(), "DialogTrigger".to_string()])
        );
    }

    #[test]
    fn test_virtual_and_absolute_sources_ignored() {
        let result = scan(
            r#"
import IconX from "~icons/lucide/x";
import data from "/abs/data";
"#,
        );
        assert!(result.packages.is_empty());
        assert!(result.components.is_empty());
    }

    #[test]
    fn test_cn_only_package_statement_contributes_nothing() {
        let result = scan(r#"import { cn } from "@/lib/utils";"#);
        assert!(result.packages.is_empty());
    }

    #[test]
    fn test_side_effect_and_dynamic_imports() {
        let result = scan(
            r#"
import "some-polyfill";
const Chart = lazy(() => import("chart-lib"));
const Other = lazy(() => import("./other"));
"#,
        );
        assert!(package(&result, "some-polyfill").imports.is_empty());
        assert!(package(&result, "chart-lib").imports.is_empty());
        assert_eq!(result.components[0].name, "other");
    }

    #[test]
    fn test_duplicate_components_merge() {
        let result = scan(
            r#"
import { Button } from "./button";
import type { ButtonProps } from "./button";
"#,
        );
        assert_eq!(result.components.len(), 1);
    }

    #[test]
    fn test_malformed_imports_are_ignored() {
        let result = scan("import { from ;\nimport \"unterminated\nconst x = 1;");
        assert!(result.packages.is_empty());
        assert!(result.components.is_empty());
    }

    #[test]
    fn test_commented_imports_are_ignored() {
        let result = scan("// import Foo from \"foo\";\n");
        assert!(result.packages.is_empty());
    }

    #[test]
    fn test_scan_is_deterministic() {
        let source = r#"
import { b, a } from "pkg";
import C from "./c";
import * as D from "@d/e/f";
"#;
        assert_eq!(scan(source), scan(source));
    }

    #[test]
    fn test_scan_imports_preserves_order() {
        let statements = scan_imports("import \"a\";\nimport B from \"b\";\nimport(\"c\");\n");
        let sources: Vec<_> = statements.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec!["a", "b", "c"]);
        assert_eq!(statements[0].kind, ImportKind::SideEffect);
        assert_eq!(statements[1].kind, ImportKind::Static { type_only: false });
        assert_eq!(statements[2].kind, ImportKind::Dynamic);
    }

    #[test]
    fn test_package_root_name() {
        assert_eq!(package_root_name("@scope/pkg/sub/path"), "@scope/pkg");
        assert_eq!(package_root_name("pkg/sub"), "pkg");
        assert_eq!(package_root_name("pkg"), "pkg");
    }

    #[test]
    fn test_scan_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_file(&dir.path().join("missing.tsx"), &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
