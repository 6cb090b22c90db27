//! Vault path normalization.

/// Normalize a vault-relative path.
///
/// - Backslashes become forward slashes
/// - Repeated slashes collapse into one
/// - Leading and trailing slashes are removed
/// - Non-breaking spaces become regular spaces
///
/// The vault root normalizes to the empty string.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            _ => c,
        })
        .collect();

    cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a normalized path into its parent folder and file name.
pub(crate) fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}
