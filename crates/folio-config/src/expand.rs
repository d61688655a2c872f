//! `${VAR}` and `${VAR:-default}` expansion for configuration strings,
//! plus `~` for storage paths.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognized; strings without `${` are returned
/// unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, MissingVar> {
        std::env::var(var).map(Some).map_err(|_| MissingVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Expand a storage path: variables first, then a leading `~` to the
/// home directory.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}

struct MissingVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_EXPAND_HOST", "0.0.0.0");
        }
        assert_eq!(
            expand_env("${FOLIO_TEST_EXPAND_HOST}", "server.host").unwrap(),
            "0.0.0.0"
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_MODEL");
        }
        assert_eq!(
            expand_env("${FOLIO_TEST_UNSET_MODEL:-gemini-2.5-pro}", "gemini.model").unwrap(),
            "gemini-2.5-pro"
        );
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_GATEWAY", "llm.internal");
        }
        assert_eq!(
            expand_env("https://${FOLIO_TEST_GATEWAY}/v1beta", "gemini.base_url").unwrap(),
            "https://llm.internal/v1beta"
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_GATEWAY");
        }
    }

    #[test]
    fn test_missing_var_is_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "gemini.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("FOLIO_TEST_MISSING"));
        assert!(message.contains("gemini.base_url"));
    }

    #[test]
    fn test_expand_path_home_and_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_SITE", "portfolio");
        }
        let expanded = expand_path("~/sites/${FOLIO_TEST_SITE}/uploads", "storage.upload_dir").unwrap();
        assert!(expanded.ends_with("/sites/portfolio/uploads"));
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expanded, format!("{home}/sites/portfolio/uploads"));
        }
        assert_eq!(
            expand_path("static/uploads", "storage.upload_dir").unwrap(),
            "static/uploads"
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_SITE");
        }
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("127.0.0.1", "server.host").unwrap(), "127.0.0.1");
        assert_eq!(expand_env("$HOME", "server.host").unwrap(), "$HOME");
    }
}
