// src/transform/meta.rs

//! Removal of the documentation-only metadata export
//!
//! Component sources end with an `export const meta: ComponentMeta<...> = {...}`
//! block describing examples for the documentation site. Its preceding
//! example-only imports and comments go with it.

use regex::Regex;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    SingleQuote,
    DoubleQuote,
    Template,
    LineComment,
    BlockComment,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Index of the `}` matching the `{` at `open`
///
/// Skips braces inside string literals, template literals (tracking `${}`
/// expressions) and comments. A quote directly after a word character is
/// JSX text (`Don't`, `12"`), and `//` after `:` is a URL; neither opens
/// anything. Returns `None` for unbalanced input.
pub fn find_matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut mode = Mode::Code;
    let mut depth = 0usize;
    let mut template_depths: Vec<usize> = Vec::new();
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        let prev = if i > open { Some(bytes[i - 1]) } else { None };
        match mode {
            Mode::Code => match b {
                b'{' => depth += 1,
                b'}' => {
                    if template_depths.last() == Some(&depth) {
                        template_depths.pop();
                        mode = Mode::Template;
                    } else {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return Some(i);
                        }
                    }
                }
                b'\'' | b'"' if prev.is_some_and(is_word_byte) => {}
                b'\'' => mode = Mode::SingleQuote,
                b'"' => mode = Mode::DoubleQuote,
                b'`' => mode = Mode::Template,
                b'/' if next == Some(b'/') && prev != Some(b':') => {
                    mode = Mode::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    mode = Mode::BlockComment;
                    i += 1;
                }
                _ => {}
            },
            Mode::SingleQuote | Mode::DoubleQuote => {
                let quote = if mode == Mode::SingleQuote { b'\'' } else { b'"' };
                if b == b'\\' {
                    i += 1;
                } else if b == quote || b == b'\n' {
                    mode = Mode::Code;
                }
            }
            Mode::Template => {
                if b == b'\\' {
                    i += 1;
                } else if b == b'`' {
                    mode = Mode::Code;
                } else if b == b'$' && next == Some(b'{') {
                    template_depths.push(depth);
                    mode = Mode::Code;
                    i += 1;
                }
            }
            Mode::LineComment => {
                if b == b'\n' {
                    mode = Mode::Code;
                }
            }
            Mode::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    mode = Mode::Code;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    None
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

fn is_import_start(trimmed: &str) -> bool {
    trimmed == "import"
        || trimmed
            .strip_prefix("import")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_whitespace() || c == '{' || c == '*' || c == '"' || c == '\'')
}

/// Inner line of a multi-line import clause: names, commas, braces
fn is_import_continuation(trimmed: &str) -> bool {
    trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '$' | ',' | '{' | '}' | '*'))
}

/// Closing line of a multi-line import, e.g. `} from "./badge";`
fn is_import_tail(trimmed: &str) -> bool {
    let Some(pos) = trimmed.rfind("from") else {
        return false;
    };
    let rest = trimmed[pos + 4..].trim();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    let quoted = match rest.chars().next() {
        Some(q @ ('"' | '\'')) => {
            rest.len() >= 2 && rest.ends_with(q) && !rest[1..rest.len() - 1].contains(['"', '\''])
        }
        _ => false,
    };
    quoted && is_import_continuation(&trimmed[..pos])
}

/// Step 1: drop blank lines, comments and imports directly above the
/// metadata export, walking upwards until real code is reached
pub fn remove_pre_meta_filler(source: &str, meta_re: &Regex) -> String {
    let Some(meta) = meta_re.find(source) else {
        return source.to_string();
    };

    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut offset = 0;
    let mut meta_line = 0;
    for (idx, line) in lines.iter().enumerate() {
        if offset + line.len() > meta.start() {
            meta_line = idx;
            break;
        }
        offset += line.len();
    }

    let mut keep_until = meta_line;
    while keep_until > 0 {
        let trimmed = lines[keep_until - 1].trim();
        if trimmed.is_empty() || is_comment_line(trimmed) || is_import_start(trimmed) {
            keep_until -= 1;
            continue;
        }
        if is_import_tail(trimmed) {
            // Walk up through clause lines to the `import` that opens it
            let start = (0..keep_until - 1)
                .rev()
                .find(|&k| {
                    let line = lines[k].trim();
                    is_import_start(line) || !is_import_continuation(line)
                })
                .filter(|&k| is_import_start(lines[k].trim()));
            if let Some(start) = start {
                keep_until = start;
                continue;
            }
        }
        break;
    }

    let mut out = String::with_capacity(source.len());
    for line in &lines[..keep_until] {
        out.push_str(line);
    }
    for line in &lines[meta_line..] {
        out.push_str(line);
    }
    out
}

/// Position of the `=` introducing the initializer, skipping `=>`, `==`
fn find_assignment(src: &str, from: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    (from..bytes.len()).find(|&i| {
        bytes[i] == b'='
            && bytes.get(i + 1) != Some(&b'>')
            && bytes.get(i + 1) != Some(&b'=')
            && !matches!(bytes.get(i.wrapping_sub(1)), Some(b'=' | b'!' | b'<' | b'>'))
    })
}

fn is_statement_remainder(rest: &str) -> bool {
    let mut rest = rest.trim();
    while let Some(stripped) = rest.strip_prefix(')') {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix("as const") {
        rest = stripped.trim_start();
    } else if let Some(stripped) = rest.strip_prefix("satisfies ") {
        rest = stripped.trim_start_matches(|c: char| c != ';').trim_start();
    }
    rest.is_empty() || rest == ";"
}

/// Step 2: delete the metadata export through its balanced closing brace
/// and statement terminator
pub fn remove_meta_block(source: &str, meta_re: &Regex) -> String {
    let Some(meta) = meta_re.find(source) else {
        return source.to_string();
    };
    let start = source[..meta.start()].rfind('\n').map_or(0, |i| i + 1);

    let Some(assign) = find_assignment(source, meta.end()) else {
        warn!("Metadata export has no initializer; leaving it in place");
        return source.to_string();
    };
    let Some(open) = source[assign..].find('{').map(|i| assign + i) else {
        warn!("Metadata export is not an object literal; leaving it in place");
        return source.to_string();
    };
    let Some(close) = find_matching_brace(source, open) else {
        warn!("Unbalanced braces in metadata export; leaving it in place");
        return source.to_string();
    };

    let line_end = source[close..].find('\n').map_or(source.len(), |i| close + i + 1);
    let rest_of_line = &source[close + 1..line_end];
    let end = if is_statement_remainder(rest_of_line) {
        line_end
    } else if rest_of_line.trim_start().starts_with(';') {
        close + 1 + rest_of_line.find(';').map_or(0, |i| i + 1)
    } else {
        close + 1
    };

    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..start]);
    let tail = &source[end..];
    if tail.trim().is_empty() {
        // Block was the last statement: end the file with a single newline
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        if !out.is_empty() {
            out.push('\n');
        }
    } else if out.ends_with("\n\n") {
        out.push_str(tail.trim_start_matches('\n'));
    } else {
        out.push_str(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta_re() -> Regex {
        Regex::new(r"(?m)^[ \t]*export\s+const\s+meta\b").unwrap()
    }

    #[test]
    fn test_matching_brace_nested() {
        let src = "{ a: { b: 1 }, c: () => { return {}; } }";
        assert_eq!(find_matching_brace(src, 0), Some(src.len() - 1));
    }

    #[test]
    fn test_matching_brace_ignores_strings_and_comments() {
        let src = r#"{ a: "}", b: '{', c: `x ${ { y: 1 }.y } }`, // }
 /* { */ d: 1 }"#;
        assert_eq!(find_matching_brace(src, 0), Some(src.len() - 1));
    }

    #[test]
    fn test_matching_brace_jsx_text() {
        let src = "{ code: () => <Card><p>Don't do this</p></Card> }";
        assert_eq!(find_matching_brace(src, 0), Some(src.len() - 1));

        let src = "{ code: () => <a href=\"https://x.dev\">https://x.dev</a>, size: <p>12\" wide</p> }";
        assert_eq!(find_matching_brace(src, 0), Some(src.len() - 1));
    }

    #[test]
    fn test_matching_brace_unbalanced() {
        assert_eq!(find_matching_brace("{ a: { b: 1 }", 0), None);
        assert_eq!(find_matching_brace("x", 0), None);
    }

    #[test]
    fn test_remove_meta_block_nested_object() {
        let src = r#"export function Card() {
  return <div />;
}

export const meta: ComponentMeta<CardProps> = {
  name: "Card",
  examples: [
    { title: "Basic", code: () => { return <Card />; } },
  ],
  nested: { deep: { deeper: "}" } },
};
"#;
        let out = remove_meta_block(src, &meta_re());
        assert_eq!(out, "export function Card() {\n  return <div />;\n}\n");
    }

    #[test]
    fn test_remove_meta_block_keeps_following_code() {
        let src = "const a = 1;\nexport const meta = { x: 1 } as const;\nexport default a;\n";
        let out = remove_meta_block(src, &meta_re());
        assert_eq!(out, "const a = 1;\nexport default a;\n");
    }

    #[test]
    fn test_remove_meta_block_absent() {
        let src = "export const metadata = { x: 1 };\n";
        assert_eq!(remove_meta_block(src, &meta_re()), src);
    }

    #[test]
    fn test_remove_pre_meta_filler() {
        let src = r#"export function Card() {}

// Examples
import { Button } from "./button";
import {
  Badge,
} from "./badge";

export const meta = {};
"#;
        let out = remove_pre_meta_filler(src, &meta_re());
        assert_eq!(out, "export function Card() {}\nexport const meta = {};\n");
    }

    #[test]
    fn test_remove_pre_meta_filler_stops_at_code_mentioning_from() {
        let src = "import { a } from \"a\";\n\nexport function Card() {}\nexport const NOTE = \"copied from 'upstream'\";\n\nexport const meta = {};\n";
        let out = remove_pre_meta_filler(src, &meta_re());
        assert_eq!(
            out,
            "import { a } from \"a\";\n\nexport function Card() {}\nexport const NOTE = \"copied from 'upstream'\";\nexport const meta = {};\n"
        );
    }

    #[test]
    fn test_remove_pre_meta_filler_keeps_code_with_trailing_comment() {
        let src = "const limit = 3; /* max */\n// Examples\nexport const meta = {};\n";
        let out = remove_pre_meta_filler(src, &meta_re());
        assert_eq!(out, "const limit = 3; /* max */\nexport const meta = {};\n");
    }

    #[test]
    fn test_remove_pre_meta_filler_without_meta() {
        let src = "import { a } from \"a\";\n\nexport const x = a;\n";
        assert_eq!(remove_pre_meta_filler(src, &meta_re()), src);
    }
}
