// src/install/fs.rs

//! File writes into the consumer project

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write a file atomically, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Temp file in the target directory so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// First free backup name: `<file>.backup`, then `<file>.backup.1`, ...
pub fn backup_path(path: &Path) -> PathBuf {
    let base = format!("{}.backup", path.display());
    let first = PathBuf::from(&base);
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| PathBuf::from(format!("{}.{}", base, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Copy an existing file to its backup name, returning where it went
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let backup = backup_path(path);
    fs::copy(path, &backup)?;
    debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("src/components/ui/button.tsx");

        write_file(&target, "export const a = 1;\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const a = 1;\n");

        write_file(&target, "export const a = 2;\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const a = 2;\n");
    }

    #[test]
    fn test_backup_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("components.json");
        fs::write(&config, "one").unwrap();

        let first = backup_file(&config).unwrap();
        assert_eq!(first, dir.path().join("components.json.backup"));

        fs::write(&config, "two").unwrap();
        let second = backup_file(&config).unwrap();
        assert_eq!(second, dir.path().join("components.json.backup.1"));
        assert_eq!(fs::read_to_string(second).unwrap(), "two");
        assert_eq!(fs::read_to_string(first).unwrap(), "one");
    }

    #[test]
    fn test_backup_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = backup_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
