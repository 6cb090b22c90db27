//! Parsing of `[[path|WxH]]` references inside a transclusion block.
//!
//! Three forms are recognised, most specific first:
//!
//! 1. `[[path|300x200]]` sets width and height
//! 2. `[[path|300]]` sets the width only
//! 3. `[[path]]` uses the configured default width
//!
//! Each form is searched across the whole block before falling back to the
//! next one, so a sized reference on a later line beats a bare reference on an
//! earlier line. A reference never spans lines. Within a line the path is
//! greedy: it runs from the first `[[` to the last `|` or `]]` that still lets
//! the form match.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransclusionError;

/// `[[path|300x200]]`
static WIDTH_AND_HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*)\|(\d+)x(\d+)\]\]").unwrap());

/// `[[path|300]]`
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*)\|(\d+)\]\]").unwrap());

/// `[[path]]`
static BARE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(.*)\]\]").unwrap());

/// Drawing reference extracted from a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Vault path exactly as written between the brackets.
    pub path: String,
    /// Requested width, either from the block or the default.
    pub width: String,
    /// Requested height, only when the block specifies one.
    pub height: Option<String>,
}

impl Reference {
    /// Extract the reference from a block's source text.
    ///
    /// # Errors
    ///
    /// Returns [`TransclusionError::MissingReference`] if no form matches or the
    /// matched path is empty.
    pub fn parse(source: &str, default_width: &str) -> Result<Self, TransclusionError> {
        let reference = if let Some(caps) = WIDTH_AND_HEIGHT_RE.captures(source) {
            Self {
                path: caps[1].to_owned(),
                width: caps[2].to_owned(),
                height: Some(caps[3].to_owned()),
            }
        } else if let Some(caps) = WIDTH_RE.captures(source) {
            Self {
                path: caps[1].to_owned(),
                width: caps[2].to_owned(),
                height: None,
            }
        } else if let Some(caps) = BARE_RE.captures(source) {
            Self {
                path: caps[1].to_owned(),
                width: default_width.to_owned(),
                height: None,
            }
        } else {
            return Err(TransclusionError::MissingReference);
        };

        if reference.path.is_empty() {
            return Err(TransclusionError::MissingReference);
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str) -> Reference {
        Reference::parse(source, "400").unwrap()
    }

    #[test]
    fn test_bare_reference_uses_default_width() {
        assert_eq!(
            parse("[[drawings/a.excalidraw]]"),
            Reference {
                path: "drawings/a.excalidraw".to_owned(),
                width: "400".to_owned(),
                height: None,
            }
        );
    }

    #[test]
    fn test_width_only() {
        let reference = parse("[[a.excalidraw|300]]");

        assert_eq!(reference.path, "a.excalidraw");
        assert_eq!(reference.width, "300");
        assert_eq!(reference.height, None);
    }

    #[test]
    fn test_width_and_height() {
        let reference = parse("[[a.excalidraw|300x200]]");

        assert_eq!(reference.path, "a.excalidraw");
        assert_eq!(reference.width, "300");
        assert_eq!(reference.height.as_deref(), Some("200"));
    }

    #[test]
    fn test_sized_form_on_later_line_wins() {
        let reference = parse("[[first.excalidraw]]\n[[second.excalidraw|120x80]]");

        assert_eq!(reference.path, "second.excalidraw");
        assert_eq!(reference.height.as_deref(), Some("80"));
    }

    #[test]
    fn test_first_line_wins_within_same_form() {
        let reference = parse("[[one.excalidraw|10]]\n[[two.excalidraw|20]]");

        assert_eq!(reference.path, "one.excalidraw");
        assert_eq!(reference.width, "10");
    }

    #[test]
    fn test_surrounding_text_ignored() {
        let reference = parse("see [[a.excalidraw]] here");

        assert_eq!(reference.path, "a.excalidraw");
    }

    #[test]
    fn test_path_extends_to_last_closing_brackets() {
        let reference = parse("[[a]] and [[b]]");

        assert_eq!(reference.path, "a]] and [[b");
    }

    #[test]
    fn test_non_numeric_size_falls_back_to_bare() {
        let reference = parse("[[a.excalidraw|wide]]");

        assert_eq!(reference.path, "a.excalidraw|wide");
        assert_eq!(reference.width, "400");
    }

    #[test]
    fn test_empty_digits_rejected() {
        let reference = parse("[[a.excalidraw|x200]]");

        assert_eq!(reference.path, "a.excalidraw|x200");
        assert_eq!(reference.height, None);
    }

    #[test]
    fn test_size_split_at_last_pipe() {
        let reference = parse("[[a|b.excalidraw|50x60]]");

        assert_eq!(reference.path, "a|b.excalidraw");
        assert_eq!(reference.width, "50");
    }

    #[test]
    fn test_extra_closing_bracket_keeps_width() {
        let reference = parse("[[a.excalidraw|300]]]");

        assert_eq!(reference.path, "a.excalidraw");
        assert_eq!(reference.width, "300");
        assert_eq!(reference.height, None);
    }

    #[test]
    fn test_extra_closing_bracket_keeps_width_and_height() {
        let reference = parse("[[a.excalidraw|300x200]]]");

        assert_eq!(reference.path, "a.excalidraw");
        assert_eq!(reference.width, "300");
        assert_eq!(reference.height.as_deref(), Some("200"));
    }

    #[test]
    fn test_extra_opening_bracket_kept_in_path() {
        let reference = parse("[[[a.excalidraw]]");

        assert_eq!(reference.path, "[a.excalidraw");
    }

    #[test]
    fn test_missing_reference() {
        for source in ["", "just text", "[single]", "[[unterminated", "[[\nx]]"] {
            let err = Reference::parse(source, "400").unwrap_err();
            assert!(
                matches!(err, TransclusionError::MissingReference),
                "{source:?}"
            );
        }
    }

    #[test]
    fn test_empty_path() {
        for source in ["[[]]", "[[|300]]", "[[|300x200]]"] {
            let err = Reference::parse(source, "400").unwrap_err();
            assert!(
                matches!(err, TransclusionError::MissingReference),
                "{source:?}"
            );
        }
    }

    #[test]
    fn test_custom_default_width() {
        let reference = Reference::parse("[[a.excalidraw]]", "100%").unwrap();

        assert_eq!(reference.width, "100%");
    }
}
