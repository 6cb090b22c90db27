//! Transclusion failure reasons.
//!
//! The `Display` text of each variant is the message shown to the reader in
//! the rendered error block.

use ink_vault::VaultError;

use crate::consts::FILE_EXTENSION;

/// Reason a transclusion could not be rendered.
#[derive(Debug, thiserror::Error)]
pub enum TransclusionError {
    /// No `[[...]]` reference found in the block, or the path was empty.
    #[error("No link to file found in codeblock.")]
    MissingReference,

    /// Nothing exists at the path, or the path names a folder.
    #[error("File does not exist. {path}")]
    FileNotFound { path: String },

    /// The referenced file is not a drawing.
    #[error("Not an excalidraw file. Must have extension {}", FILE_EXTENSION)]
    WrongExtension { extension: String },

    /// The drawing content could not be converted to a vector image.
    #[error("Parse error. Not a valid Excalidraw file.")]
    ParseError,

    /// The vault failed to read the file.
    #[error("Unable to read file. {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: VaultError,
    },
}

#[cfg(test)]
mod tests {
    use ink_vault::VaultErrorKind;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TransclusionError::MissingReference.to_string(),
            "No link to file found in codeblock."
        );
        assert_eq!(
            TransclusionError::FileNotFound {
                path: "drawings/missing.excalidraw".to_owned()
            }
            .to_string(),
            "File does not exist. drawings/missing.excalidraw"
        );
        assert_eq!(
            TransclusionError::WrongExtension {
                extension: "md".to_owned()
            }
            .to_string(),
            "Not an excalidraw file. Must have extension excalidraw"
        );
        assert_eq!(
            TransclusionError::ParseError.to_string(),
            "Parse error. Not a valid Excalidraw file."
        );
    }

    #[test]
    fn test_read_failed_keeps_source() {
        let err = TransclusionError::ReadFailed {
            path: "a.excalidraw".to_owned(),
            source: VaultError::new(VaultErrorKind::PermissionDenied).with_backend("Mock"),
        };

        assert_eq!(
            err.to_string(),
            "Unable to read file. a.excalidraw: [Mock] Permission denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
