// src/transform/validate.rs

//! Shallow sanity checks on transformed component sources
//!
//! These are lint-style heuristics, not syntax validation. Problems are
//! reported as human-readable messages.

use regex::Regex;
use std::sync::LazyLock;

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(function|const|let|var|class|interface|type|enum)\s").unwrap()
});

static CLASS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bclassName\s*=").unwrap());

static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*export\b").unwrap());

/// Check transformed output; an empty list means the source looks sane
pub fn validate_source(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return vec!["Transformed source is empty".to_string()];
    }

    let mut problems = Vec::new();
    if !DECLARATION_RE.is_match(content) {
        problems.push("No declarations found (function, const, class, ...)".to_string());
    }
    if CLASS_NAME_RE.is_match(content) {
        problems.push("Uses `className`; components must use `class`".to_string());
    }
    if !EXPORT_RE.is_match(content) {
        problems.push("Nothing is exported".to_string());
    }
    problems
}
