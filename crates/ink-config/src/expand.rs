//! `${VAR}` and `${VAR:-default}` expansion for config values.
//!
//! Only the braced form is expanded. A bare `$VAR` is kept as written, since a
//! vault path or a drawing folder may legitimately contain a dollar sign.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand environment references in the value of `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("${{{}}} not set", e.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_width_from_env() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("INK_EXPAND_WIDTH", "640");
        }
        let width = expand_env("${INK_EXPAND_WIDTH}", "transclusion.default_width").unwrap();
        assert_eq!(width, "640");
        unsafe {
            std::env::remove_var("INK_EXPAND_WIDTH");
        }
    }

    #[test]
    fn test_default_width_fallback() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("INK_EXPAND_UNSET_WIDTH");
        }
        let width =
            expand_env("${INK_EXPAND_UNSET_WIDTH:-100%}", "transclusion.default_width").unwrap();
        assert_eq!(width, "100%");
    }

    #[test]
    fn test_template_path_with_embedded_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("INK_EXPAND_SKETCHES", "Sketches");
        }
        let template =
            expand_env("${INK_EXPAND_SKETCHES}/Template.excalidraw", "drawings.template").unwrap();
        assert_eq!(template, "Sketches/Template.excalidraw");
        unsafe {
            std::env::remove_var("INK_EXPAND_SKETCHES");
        }
    }

    #[test]
    fn test_unset_var_names_field() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("INK_EXPAND_MISSING");
        }
        let err = expand_env("${INK_EXPAND_MISSING}", "drawings.folder").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("INK_EXPAND_MISSING"), "{message}");
        assert!(message.contains("drawings.folder"), "{message}");
    }

    #[test]
    fn test_bare_dollar_kept() {
        let folder = expand_env("$drafts/excalidraw", "drawings.folder").unwrap();
        assert_eq!(folder, "$drafts/excalidraw");
    }
}
