// src/transform/mod.rs

//! Source transformer
//!
//! Rewrites a component's library source into the text that lands in the
//! consumer project. The steps run in a fixed order:
//!
//! 1. drop filler (blank lines, comments, imports) above the metadata export
//! 2. drop the metadata export block itself
//! 3. drop the metadata type import
//! 4. drop the shared utility import
//! 5. remap icon imports to the consumer's icon library
//! 6. inline the utility function after the imports
//! 7. prune unused imports and sort the remainder by module path
//!
//! Running the transformer on its own output leaves it unchanged.

mod imports;
mod meta;
mod validate;

pub use imports::{contains_identifier, prune_unused_imports, ImportBlock, ImportDecl};
pub use meta::find_matching_brace;
pub use validate::validate_source;

use crate::config::TransformConfig;
use crate::error::Result;
use regex::Regex;
use tracing::trace;

/// Applies the rewrite steps for one project configuration
#[derive(Debug, Clone)]
pub struct SourceTransformer {
    config: TransformConfig,
    meta_export_re: Regex,
    meta_type_import_re: Regex,
    utility_import_re: Regex,
}

impl SourceTransformer {
    pub fn new(config: TransformConfig) -> Result<Self> {
        let meta_export_re = Regex::new(&format!(
            r"(?m)^[ \t]*export\s+const\s+{}\b",
            regex::escape(&config.meta_export)
        ))?;
        let meta_type_import_re = Regex::new(&format!(
            r#"(?m)^[ \t]*import\s+(?:type\s+)?\{{\s*(?:type\s+)?{}\s*\}}\s*from\s*["'][^"'\n]+["'];?[ \t]*(?:\r?\n)?"#,
            regex::escape(&config.meta_type)
        ))?;
        let utility_import_re = Regex::new(&format!(
            r#"(?m)^[ \t]*import\s+\{{\s*{}\s*\}}\s*from\s*["'][^"'\n]+["'];?[ \t]*(?:\r?\n)?"#,
            regex::escape(&config.utility_name)
        ))?;

        Ok(Self {
            config,
            meta_export_re,
            meta_type_import_re,
            utility_import_re,
        })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Run every step in order
    pub fn transform(&self, source: &str) -> String {
        let out = self.remove_pre_meta_filler(source);
        let out = self.remove_meta_block(&out);
        let out = self.strip_meta_type_import(&out);
        let out = self.strip_utility_import(&out);
        let out = self.remap_icons(&out);
        let out = self.inline_utility(&out);
        let out = self.prune_imports(&out);
        trace!("Transformed {} bytes into {}", source.len(), out.len());
        out
    }

    pub fn remove_pre_meta_filler(&self, source: &str) -> String {
        meta::remove_pre_meta_filler(source, &self.meta_export_re)
    }

    pub fn remove_meta_block(&self, source: &str) -> String {
        meta::remove_meta_block(source, &self.meta_export_re)
    }

    pub fn strip_meta_type_import(&self, source: &str) -> String {
        self.meta_type_import_re.replace_all(source, "").into_owned()
    }

    pub fn strip_utility_import(&self, source: &str) -> String {
        self.utility_import_re.replace_all(source, "").into_owned()
    }

    /// Rewrite `~icons/<canonical>/` to `~icons/<configured>/`
    pub fn remap_icons(&self, source: &str) -> String {
        if self.config.icon_library == self.config.canonical_icon_library {
            return source.to_string();
        }
        let from = format!("{}{}/", self.config.icon_prefix, self.config.canonical_icon_library);
        let to = format!("{}{}/", self.config.icon_prefix, self.config.icon_library);
        source.replace(&from, &to)
    }

    /// Insert the utility function unless it is already defined
    pub fn inline_utility(&self, source: &str) -> String {
        let signature = format!("function {}(", self.config.utility_name);
        if source.contains(&signature) {
            return source.to_string();
        }
        imports::insert_after_imports(source, self.config.inline_utility.trim_end())
    }

    pub fn prune_imports(&self, source: &str) -> String {
        prune_unused_imports(source)
    }
}
