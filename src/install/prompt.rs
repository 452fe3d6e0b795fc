// src/install/prompt.rs

//! Operator confirmation prompts

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Answer to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// The operator wants to abort the whole run
    Cancelled,
}

/// Asks the operator yes/no questions
pub trait Prompter {
    fn confirm(&self, question: &str, default: bool) -> Result<Confirmation>;
}

/// Interactive prompt on stdin/stdout
///
/// End of input or `q` cancels; an empty answer takes the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Read one answer from any reader; split out so it can be tested
    pub fn ask<R: BufRead, W: Write>(
        input: &mut R,
        output: &mut W,
        question: &str,
        default: bool,
    ) -> Result<Confirmation> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(output, "{} {} ", question, hint)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(Confirmation::Cancelled);
            }

            match line.trim().to_lowercase().as_str() {
                "" => return Ok(if default { Confirmation::Yes } else { Confirmation::No }),
                "y" | "yes" => return Ok(Confirmation::Yes),
                "n" | "no" => return Ok(Confirmation::No),
                "q" | "quit" | "cancel" => return Ok(Confirmation::Cancelled),
                _ => writeln!(output, "Please answer y, n or q.")?,
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<Confirmation> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        Self::ask(&mut stdin.lock(), &mut stdout, question, default)
    }
}

/// Answers yes to everything (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _question: &str, _default: bool) -> Result<Confirmation> {
        Ok(Confirmation::Yes)
    }
}
