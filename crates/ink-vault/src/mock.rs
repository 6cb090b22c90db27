//! Mock vault implementation for testing.
//!
//! Provides [`MockVault`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use crate::path::{normalize_path, split_parent};
use crate::vault::{Entry, Vault, VaultError, VaultErrorKind, VaultFile, VaultFolder};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock vault for testing.
///
/// Stores files and folders in memory. Parent folders of added files are
/// registered implicitly. Use the builder methods to configure test data.
///
/// # Example
///
/// ```ignore
/// use ink_vault::{MockVault, Vault};
///
/// let vault = MockVault::new()
///     .with_file("excalidraw/a.excalidraw", "{}")
///     .with_unreadable("broken.excalidraw");
///
/// assert!(vault.entry("excalidraw").unwrap().is_folder());
/// ```
#[derive(Debug, Default)]
pub struct MockVault {
    files: RwLock<BTreeMap<String, String>>,
    folders: RwLock<BTreeSet<String>>,
    unreadable: RwLock<BTreeSet<String>>,
}

impl MockVault {
    /// Create a new empty mock vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        let path = normalize_path(path);
        self.register_parents(&path);
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Add an empty folder.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_folder(self, path: &str) -> Self {
        let path = normalize_path(path);
        self.register_parents(&path);
        self.folders.write().unwrap().insert(path);
        self
    }

    /// Add a file that exists but fails to read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: &str) -> Self {
        let path = normalize_path(path);
        let this = self.with_file(&path, "");
        this.unreadable.write().unwrap().insert(path);
        this
    }

    /// Content of a file, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content(&self, path: &str) -> Option<String> {
        self.files.read().unwrap().get(&normalize_path(path)).cloned()
    }

    /// Number of files in the vault.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.read().unwrap().len()
    }

    fn register_parents(&self, path: &str) {
        let mut folders = self.folders.write().unwrap();
        let mut current = split_parent(path).0;
        while !current.is_empty() {
            folders.insert(current.to_owned());
            current = split_parent(current).0;
        }
    }
}

impl Vault for MockVault {
    fn entry(&self, path: &str) -> Option<Entry> {
        let path = normalize_path(path);
        if path.is_empty() || self.folders.read().unwrap().contains(&path) {
            return Some(Entry::Folder(VaultFolder { path }));
        }
        self.files
            .read()
            .unwrap()
            .contains_key(&path)
            .then(|| Entry::File(VaultFile::from_path(path)))
    }

    fn read(&self, file: &VaultFile) -> Result<String, VaultError> {
        if self.unreadable.read().unwrap().contains(&file.path) {
            return Err(VaultError::new(VaultErrorKind::PermissionDenied)
                .with_path(file.path.clone())
                .with_backend(BACKEND));
        }
        self.files
            .read()
            .unwrap()
            .get(&file.path)
            .cloned()
            .ok_or_else(|| VaultError::not_found(file.path.clone()).with_backend(BACKEND))
    }

    fn create(&self, path: &str, content: &str) -> Result<VaultFile, VaultError> {
        let path = normalize_path(path);
        if self.entry(&path).is_some() {
            return Err(VaultError::new(VaultErrorKind::AlreadyExists)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.register_parents(&path);
        self.files
            .write()
            .unwrap()
            .insert(path.clone(), content.to_owned());
        Ok(VaultFile::from_path(path))
    }

    fn create_folder(&self, path: &str) -> Result<VaultFolder, VaultError> {
        let path = normalize_path(path);
        if self.files.read().unwrap().contains_key(&path) {
            return Err(VaultError::new(VaultErrorKind::AlreadyExists)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.register_parents(&path);
        self.folders.write().unwrap().insert(path.clone());
        Ok(VaultFolder { path })
    }
}
