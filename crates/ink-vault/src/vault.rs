//! Vault trait, entry types and error types.
//!
//! # Path Convention
//!
//! All path parameters are **vault paths**: forward-slash separated, relative to
//! the vault root, without leading slash (e.g., `"excalidraw/Drawing.excalidraw"`).
//! Use [`normalize_path`](crate::normalize_path) on user input first.

use crate::path::split_parent;

/// A file in the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultFile {
    /// Vault path (e.g., "excalidraw/diagram.excalidraw").
    pub path: String,
    /// File name with extension (e.g., "diagram.excalidraw").
    pub name: String,
    /// File name without extension (e.g., "diagram").
    pub basename: String,
    /// Extension after the last dot, without the dot (empty if none).
    pub extension: String,
}

impl VaultFile {
    /// Build a file handle from a vault path.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let (_, name) = split_parent(&path);
        let (basename, extension) = match name.rsplit_once('.') {
            Some((base, ext)) => (base.to_owned(), ext.to_owned()),
            None => (name.to_owned(), String::new()),
        };
        Self {
            name: name.to_owned(),
            basename,
            extension,
            path,
        }
    }
}

/// A folder in the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultFolder {
    /// Vault path (empty for the root).
    pub path: String,
}

/// Result of looking up a vault path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Regular file.
    File(VaultFile),
    /// Folder (including the vault root).
    Folder(VaultFolder),
}

impl Entry {
    /// Vault path of the entry.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::File(file) => &file.path,
            Self::Folder(folder) => &folder.path,
        }
    }

    /// The file handle, if this entry is a file.
    #[must_use]
    pub fn as_file(&self) -> Option<&VaultFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    /// Consume the entry, keeping it only if it is a file.
    #[must_use]
    pub fn into_file(self) -> Option<VaultFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum VaultErrorKind {
    /// Entry does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Entry already exists (for create operations).
    AlreadyExists,
    /// Invalid vault path.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Vault error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct VaultError {
    /// Semantic error category.
    pub kind: VaultErrorKind,
    /// Vault path context (if applicable).
    pub path: Option<String>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VaultError {
    /// Create a new vault error.
    #[must_use]
    pub fn new(kind: VaultErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(VaultErrorKind::NotFound).with_path(path)
    }

    /// Create a vault error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => VaultErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => VaultErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => VaultErrorKind::AlreadyExists,
            _ => VaultErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            VaultErrorKind::NotFound => "Not found",
            VaultErrorKind::PermissionDenied => "Permission denied",
            VaultErrorKind::AlreadyExists => "Already exists",
            VaultErrorKind::InvalidPath => "Invalid path",
            VaultErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }

        Ok(())
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Vault abstraction for entry lookup, reading and creation.
///
/// Lookups never fail: an unreadable or missing path is simply absent. Lookups do
/// not distinguish files from folders for the caller; inspect the returned
/// [`Entry`].
pub trait Vault: Send + Sync {
    /// Look up the entry at a vault path.
    fn entry(&self, path: &str) -> Option<Entry>;

    /// Read the full text content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError`] if the file disappeared or can't be read.
    fn read(&self, file: &VaultFile) -> Result<String, VaultError>;

    /// Create a new file with the given content.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError`] with [`VaultErrorKind::AlreadyExists`] if an entry
    /// exists at `path`, or another kind if the write fails.
    fn create(&self, path: &str, content: &str) -> Result<VaultFile, VaultError>;

    /// Create a folder, including missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError`] if a file occupies the path or creation fails.
    fn create_folder(&self, path: &str) -> Result<VaultFolder, VaultError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_file_from_path() {
        let file = VaultFile::from_path("excalidraw/diagram.excalidraw");

        assert_eq!(file.path, "excalidraw/diagram.excalidraw");
        assert_eq!(file.name, "diagram.excalidraw");
        assert_eq!(file.basename, "diagram");
        assert_eq!(file.extension, "excalidraw");
    }

    #[test]
    fn test_vault_file_multiple_dots() {
        let file = VaultFile::from_path("Drawing 2024-01-02 10.11.12.excalidraw");

        assert_eq!(file.basename, "Drawing 2024-01-02 10.11.12");
        assert_eq!(file.extension, "excalidraw");
    }

    #[test]
    fn test_vault_file_without_extension() {
        let file = VaultFile::from_path("notes/README");

        assert_eq!(file.name, "README");
        assert_eq!(file.basename, "README");
        assert_eq!(file.extension, "");
    }

    #[test]
    fn test_entry_accessors() {
        let file = Entry::File(VaultFile::from_path("a.md"));
        let folder = Entry::Folder(VaultFolder {
            path: "drawings".to_owned(),
        });

        assert_eq!(file.path(), "a.md");
        assert!(file.as_file().is_some());
        assert!(!file.is_folder());
        assert_eq!(folder.path(), "drawings");
        assert!(folder.is_folder());
        assert!(folder.into_file().is_none());
    }

    #[test]
    fn test_vault_error_display_simple() {
        let err = VaultError::new(VaultErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_vault_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = VaultError::new(VaultErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("a/b.excalidraw")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: a/b.excalidraw)"
        );
    }

    #[test]
    fn test_vault_error_io_kinds() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            VaultError::io(denied, "x").kind,
            VaultErrorKind::PermissionDenied
        );

        let exists = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        assert_eq!(VaultError::io(exists, "x").kind, VaultErrorKind::AlreadyExists);
    }

    #[test]
    fn test_vault_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VaultError>();
    }
}
