// src/transform/imports.rs

//! Leading import block handling: splitting, pruning, sorting

use crate::scanner::{scan_imports, ImportBindings, ImportKind, NamedImport};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'][^"'\n]*["']"#).unwrap());

/// One statement of the leading import block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Original statement text without trailing newline
    pub text: String,
    pub source: String,
    pub quote: char,
    pub type_only: bool,
    pub bindings: ImportBindings,
    /// No bindings (`import "x"`) or not understood; always kept verbatim
    pub opaque: bool,
    /// Comment lines directly above the statement inside the block
    pub comments: Vec<String>,
}

impl ImportDecl {
    fn parse(text: &str) -> Self {
        let text = text.trim_end().to_string();
        let statement = scan_imports(&text).into_iter().next();
        match statement {
            Some(statement) if matches!(statement.kind, ImportKind::Static { .. }) => {
                let type_only = matches!(statement.kind, ImportKind::Static { type_only: true });
                let quote = quote_of(&text, &statement.source);
                Self {
                    source: statement.source,
                    quote,
                    type_only,
                    opaque: statement.bindings.is_empty(),
                    bindings: statement.bindings,
                    text,
                    comments: Vec::new(),
                }
            }
            Some(statement) => Self {
                quote: quote_of(&text, &statement.source),
                source: statement.source,
                type_only: false,
                bindings: ImportBindings::default(),
                opaque: true,
                text,
                comments: Vec::new(),
            },
            None => Self {
                source: text.clone(),
                quote: '"',
                type_only: false,
                bindings: ImportBindings::default(),
                opaque: true,
                text,
                comments: Vec::new(),
            },
        }
    }

    /// Statement text preceded by its comment lines
    fn with_comments(&self, statement: String) -> String {
        if self.comments.is_empty() {
            return statement;
        }
        let mut out = self.comments.join("\n");
        out.push('\n');
        out.push_str(&statement);
        out
    }

    /// Render a statement with a reduced set of bindings
    fn render(&self, bindings: &ImportBindings) -> String {
        let mut clause = Vec::new();
        if let Some(default) = &bindings.default {
            clause.push(default.clone());
        }
        if let Some(namespace) = &bindings.namespace {
            clause.push(format!("* as {}", namespace));
        }
        if !bindings.named.is_empty() {
            let named: Vec<String> = bindings.named.iter().map(render_named).collect();
            clause.push(format!("{{ {} }}", named.join(", ")));
        }

        format!(
            "import {}{} from {q}{}{q};",
            if self.type_only { "type " } else { "" },
            clause.join(", "),
            self.source,
            q = self.quote
        )
    }
}

fn render_named(named: &NamedImport) -> String {
    let prefix = if named.type_only { "type " } else { "" };
    if named.imported == named.local {
        format!("{}{}", prefix, named.local)
    } else {
        format!("{}{} as {}", prefix, named.imported, named.local)
    }
}

fn quote_of(text: &str, source: &str) -> char {
    let single = text.rfind(&format!("'{}'", source));
    let double = text.rfind(&format!("\"{}\"", source));
    match (single, double) {
        (Some(s), Some(d)) if s > d => '\'',
        (Some(_), None) => '\'',
        _ => '"',
    }
}

/// A source file split around its leading import block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBlock {
    /// Comments and blank lines before the first import
    pub preamble: String,
    pub imports: Vec<ImportDecl>,
    /// Everything after the import block, leading blank lines removed
    pub body: String,
}

fn is_import_start(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("import")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || c == '{' || c == '*' || c == '"' || c == '\'')
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

impl ImportBlock {
    /// Split source text into preamble, import statements and body
    ///
    /// The block ends at the first line that is neither blank, a comment nor
    /// the start of an import statement. Comments inside the block stay
    /// attached to the import below them; comments after the last import
    /// belong to the body.
    pub fn split(source: &str) -> Self {
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        let mut i = 0;

        while i < lines.len() {
            let trimmed = lines[i].trim();
            if trimmed.is_empty() || (is_comment(trimmed) && !is_import_start(trimmed)) {
                i += 1;
            } else {
                break;
            }
        }

        if i >= lines.len() || !is_import_start(lines[i].trim()) {
            return Self {
                preamble: String::new(),
                imports: Vec::new(),
                body: source.to_string(),
            };
        }
        let preamble: String = lines[..i].concat();

        let mut imports = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        let mut block_end = i;
        while i < lines.len() {
            let trimmed = lines[i].trim();
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            if is_comment(trimmed) && !is_import_start(trimmed) {
                pending.push(lines[i].trim_end().to_string());
                i += 1;
                continue;
            }
            if !is_import_start(trimmed) {
                break;
            }

            // Accumulate until the module specifier has been seen
            let mut statement = String::new();
            while i < lines.len() {
                statement.push_str(lines[i]);
                i += 1;
                if QUOTED_RE.is_match(&statement) {
                    break;
                }
            }
            if !QUOTED_RE.is_match(&statement) {
                break;
            }
            let mut decl = ImportDecl::parse(&statement);
            decl.comments = std::mem::take(&mut pending);
            imports.push(decl);
            block_end = i;
        }

        let body_start = (block_end..lines.len())
            .find(|&k| !lines[k].trim().is_empty())
            .unwrap_or(lines.len());

        Self {
            preamble,
            imports,
            body: lines[body_start..].concat(),
        }
    }

    /// Reassemble imports and body with one blank line between them
    pub fn assemble(preamble: &str, imports: &[String], body: &str) -> String {
        let mut out = String::from(preamble);
        if imports.is_empty() {
            out.push_str(body);
            return out;
        }
        out.push_str(&imports.join("\n"));
        out.push('\n');
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
        }
        out
    }

    /// Current import statements as text, in block order
    pub fn import_texts(&self) -> Vec<String> {
        self.imports
            .iter()
            .map(|d| d.with_comments(d.text.clone()))
            .collect()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whole-word occurrence of an identifier
pub fn contains_identifier(haystack: &str, ident: &str) -> bool {
    haystack.match_indices(ident).any(|(pos, _)| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + ident.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// Keep only bindings still referenced in `body`; `None` if nothing is used
fn used_bindings(bindings: &ImportBindings, body: &str) -> Option<ImportBindings> {
    let used = ImportBindings {
        default: bindings
            .default
            .clone()
            .filter(|name| contains_identifier(body, name)),
        namespace: bindings
            .namespace
            .clone()
            .filter(|name| contains_identifier(body, name)),
        named: bindings
            .named
            .iter()
            .filter(|named| contains_identifier(body, &named.local))
            .cloned()
            .collect(),
    };
    if used.is_empty() { None } else { Some(used) }
}

/// Drop bindings whose local name an earlier import already introduced
fn unbound_bindings(bindings: ImportBindings, bound: &HashSet<String>) -> ImportBindings {
    ImportBindings {
        default: bindings.default.filter(|name| !bound.contains(name)),
        namespace: bindings.namespace.filter(|name| !bound.contains(name)),
        named: bindings
            .named
            .into_iter()
            .filter(|named| !bound.contains(&named.local))
            .collect(),
    }
}

/// Step 7: drop unused imports, trim partially used ones, sort by module path
///
/// A local name is bound at most once: a later import of an identifier the
/// block already introduced loses that binding.
pub fn prune_unused_imports(source: &str) -> String {
    let block = ImportBlock::split(source);
    if block.imports.is_empty() {
        return source.to_string();
    }

    let mut bound: HashSet<String> = HashSet::new();
    let mut kept: Vec<(&str, String)> = Vec::new();
    for decl in &block.imports {
        if decl.opaque {
            kept.push((decl.source.as_str(), decl.with_comments(decl.text.clone())));
            continue;
        }
        let Some(used) = used_bindings(&decl.bindings, &block.body) else {
            continue;
        };
        let fresh = unbound_bindings(used, &bound);
        if fresh.is_empty() {
            continue;
        }
        bound.extend(fresh.locals().into_iter().map(str::to_string));
        let text = if fresh == decl.bindings {
            decl.text.clone()
        } else {
            decl.render(&fresh)
        };
        kept.push((decl.source.as_str(), decl.with_comments(text)));
    }

    // Byte order puts `~`-prefixed virtual modules after package names
    kept.sort_by(|a, b| a.0.cmp(b.0));
    let texts: Vec<String> = kept.into_iter().map(|(_, text)| text).collect();
    ImportBlock::assemble(&block.preamble, &texts, &block.body)
}

/// Step 6: insert a code block right after the leading imports
pub fn insert_after_imports(source: &str, code: &str) -> String {
    let block = ImportBlock::split(source);
    let mut body = String::from(code);
    body.push_str("\n\n");
    body.push_str(&block.body);
    if block.imports.is_empty() {
        // No imports: block goes after any leading comments
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        let lead = lines
            .iter()
            .take_while(|line| {
                let trimmed = line.trim();
                trimmed.is_empty() || is_comment(trimmed)
            })
            .count();
        let mut out = lines[..lead].concat();
        out.push_str(code);
        out.push_str("\n\n");
        out.push_str(lines[lead..].concat().trim_start_matches('\n'));
        return out;
    }
    ImportBlock::assemble(&block.preamble, &block.import_texts(), &body)
}
