// src/install/formatter.rs

//! Best-effort formatting of written component files

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

/// Default time a formatter may run before it is killed
pub const DEFAULT_FORMAT_TIMEOUT: Duration = Duration::from_secs(10);

/// What happened when formatting a file
///
/// Formatting is cosmetic, so every failure mode is a value here rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted,
    /// No formatter is installed
    Unavailable,
    /// The formatter ran and failed
    Failed(String),
    TimedOut,
}

/// Formats a file in place
pub trait SourceFormatter {
    fn format(&self, project_root: &Path, file: &Path) -> FormatOutcome;
}

/// Runs `prettier --write` from the project's `node_modules/.bin` or `PATH`
#[derive(Debug, Clone)]
pub struct PrettierFormatter {
    timeout: Duration,
}

impl Default for PrettierFormatter {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FORMAT_TIMEOUT,
        }
    }
}

impl PrettierFormatter {
    fn locate(project_root: &Path) -> Option<PathBuf> {
        let local = project_root.join("node_modules").join(".bin").join("prettier");
        if local.is_file() {
            return Some(local);
        }
        which::which("prettier").ok()
    }
}

impl SourceFormatter for PrettierFormatter {
    fn format(&self, project_root: &Path, file: &Path) -> FormatOutcome {
        let Some(program) = Self::locate(project_root) else {
            debug!("prettier not found; leaving {} unformatted", file.display());
            return FormatOutcome::Unavailable;
        };

        let child = Command::new(&program)
            .arg("--write")
            .arg(file)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => return FormatOutcome::Failed(format!("failed to spawn prettier: {}", e)),
        };

        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) if status.success() => FormatOutcome::Formatted,
            Ok(Some(status)) => {
                debug!("prettier failed on {}: {}", file.display(), status);
                FormatOutcome::Failed(format!("exit code {}", status.code().unwrap_or(-1)))
            }
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                debug!("prettier timed out after {}s", self.timeout.as_secs());
                FormatOutcome::TimedOut
            }
            Err(e) => FormatOutcome::Failed(e.to_string()),
        }
    }
}

/// Skips formatting entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn format(&self, _project_root: &Path, _file: &Path) -> FormatOutcome {
        FormatOutcome::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_formatter() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = NoopFormatter.format(dir.path(), &dir.path().join("x.tsx"));
        assert_eq!(outcome, FormatOutcome::Unavailable);
    }
}
