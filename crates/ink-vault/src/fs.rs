//! Filesystem vault implementation.
//!
//! Provides [`FsVault`] for a vault stored as a plain directory tree.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::path::normalize_path;
use crate::vault::{Entry, Vault, VaultError, VaultErrorKind, VaultFile, VaultFolder};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem vault rooted in a directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use ink_vault::{FsVault, Vault};
///
/// let vault = FsVault::new(PathBuf::from("notes"));
/// let entry = vault.entry("excalidraw");
/// ```
#[derive(Debug)]
pub struct FsVault {
    /// Root directory of the vault.
    root: PathBuf,
}

impl FsVault {
    /// Create a vault rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the vault.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalize a vault path and map it to a filesystem path.
    ///
    /// Rejects paths containing parent directory components (`..`) so that
    /// lookups can't escape the vault root.
    fn resolve(&self, path: &str) -> Result<(String, PathBuf), VaultError> {
        let normalized = normalize_path(path);
        let relative = Path::new(&normalized);

        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            return Err(VaultError::new(VaultErrorKind::InvalidPath)
                .with_path(normalized)
                .with_backend(BACKEND));
        }

        let full_path = self.root.join(relative);
        Ok((normalized, full_path))
    }
}

impl Vault for FsVault {
    fn entry(&self, path: &str) -> Option<Entry> {
        let (normalized, full_path) = self.resolve(path).ok()?;
        let metadata = fs::metadata(&full_path).ok()?;

        if metadata.is_dir() {
            Some(Entry::Folder(VaultFolder { path: normalized }))
        } else if metadata.is_file() {
            Some(Entry::File(VaultFile::from_path(normalized)))
        } else {
            None
        }
    }

    fn read(&self, file: &VaultFile) -> Result<String, VaultError> {
        let (normalized, full_path) = self.resolve(&file.path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| VaultError::io(e, normalized).with_backend(BACKEND))
    }

    fn create(&self, path: &str, content: &str) -> Result<VaultFile, VaultError> {
        let (normalized, full_path) = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| VaultError::io(e, normalized.clone()).with_backend(BACKEND))?;
        }

        // create_new fails with AlreadyExists instead of truncating
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .map_err(|e| VaultError::io(e, normalized.clone()).with_backend(BACKEND))?;
        file.write_all(content.as_bytes())
            .map_err(|e| VaultError::io(e, normalized.clone()).with_backend(BACKEND))?;

        tracing::debug!(path = %normalized, "Created vault file");
        Ok(VaultFile::from_path(normalized))
    }

    fn create_folder(&self, path: &str) -> Result<VaultFolder, VaultError> {
        let (normalized, full_path) = self.resolve(path)?;

        if full_path.is_file() {
            return Err(VaultError::new(VaultErrorKind::AlreadyExists)
                .with_path(normalized)
                .with_backend(BACKEND));
        }

        fs::create_dir_all(&full_path)
            .map_err(|e| VaultError::io(e, normalized.clone()).with_backend(BACKEND))?;

        tracing::debug!(path = %normalized, "Created vault folder");
        Ok(VaultFolder { path: normalized })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, FsVault) {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let vault = FsVault::new(dir.path().to_path_buf());
        (dir, vault)
    }

    #[test]
    fn test_entry_file() {
        let (_dir, vault) = vault_with(&[("excalidraw/a.excalidraw", "{}")]);

        let entry = vault.entry("excalidraw/a.excalidraw").unwrap();

        assert_eq!(
            entry,
            Entry::File(VaultFile::from_path("excalidraw/a.excalidraw"))
        );
    }

    #[test]
    fn test_entry_folder() {
        let (_dir, vault) = vault_with(&[("excalidraw/a.excalidraw", "{}")]);

        let entry = vault.entry("excalidraw").unwrap();

        assert!(entry.is_folder());
        assert_eq!(entry.path(), "excalidraw");
    }

    #[test]
    fn test_entry_normalizes_path() {
        let (_dir, vault) = vault_with(&[("excalidraw/a.excalidraw", "{}")]);

        let entry = vault.entry("/excalidraw//a.excalidraw").unwrap();

        assert_eq!(entry.path(), "excalidraw/a.excalidraw");
    }

    #[test]
    fn test_entry_missing() {
        let (_dir, vault) = vault_with(&[]);

        assert!(vault.entry("note").is_none());
    }

    #[test]
    fn test_entry_rejects_traversal() {
        let (_dir, vault) = vault_with(&[]);

        assert!(vault.entry("../etc/passwd").is_none());
    }

    #[test]
    fn test_read() {
        let (_dir, vault) = vault_with(&[("a.excalidraw", "content")]);
        let file = vault.entry("a.excalidraw").unwrap().into_file().unwrap();

        assert_eq!(vault.read(&file).unwrap(), "content");
    }

    #[test]
    fn test_read_missing() {
        let (_dir, vault) = vault_with(&[]);

        let err = vault.read(&VaultFile::from_path("gone.excalidraw")).unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path.as_deref(), Some("gone.excalidraw"));
    }

    #[test]
    fn test_read_traversal_rejected() {
        let (_dir, vault) = vault_with(&[]);

        let err = vault.read(&VaultFile::from_path("../secret")).unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::InvalidPath);
    }

    #[test]
    fn test_create_with_parents() {
        let (dir, vault) = vault_with(&[]);

        let file = vault.create("drawings/new.excalidraw", "{}").unwrap();

        assert_eq!(file.path, "drawings/new.excalidraw");
        assert_eq!(
            fs::read_to_string(dir.path().join("drawings/new.excalidraw")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_create_existing_fails() {
        let (_dir, vault) = vault_with(&[("a.excalidraw", "old")]);

        let err = vault.create("a.excalidraw", "new").unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::AlreadyExists);
    }

    #[test]
    fn test_create_folder() {
        let (dir, vault) = vault_with(&[]);

        let folder = vault.create_folder("a/b").unwrap();

        assert_eq!(folder.path, "a/b");
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_create_folder_over_file_fails() {
        let (_dir, vault) = vault_with(&[("taken", "")]);

        let err = vault.create_folder("taken").unwrap_err();

        assert_eq!(err.kind, VaultErrorKind::AlreadyExists);
    }
}
