//! Vault file store abstraction for inkvault.
//!
//! This crate provides a [`Vault`] trait for the narrow slice of a note vault that
//! drawings and transclusions need: looking up an entry by path, reading a file,
//! and creating files and folders. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Host flexibility** (plain directories, application-managed vaults)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Vault`] trait with `entry()`, `read()`, `create()`, and `create_folder()` methods
//! - [`FsVault`] implementation rooted in a directory
//! - [`MockVault`] for testing (behind `mock` feature flag)
//! - [`normalize_path`] for vault-relative path normalization
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use ink_vault::{Entry, FsVault, Vault};
//!
//! let vault = FsVault::new(PathBuf::from("notes"));
//! if let Some(Entry::File(file)) = vault.entry("excalidraw/diagram.excalidraw") {
//!     let content = vault.read(&file)?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod path;
mod vault;

pub use fs::FsVault;
#[cfg(feature = "mock")]
pub use mock::MockVault;
pub use path::normalize_path;
pub use vault::{Entry, Vault, VaultError, VaultErrorKind, VaultFile, VaultFolder};
