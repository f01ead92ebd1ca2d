//! Startup configuration read from the environment.

use crate::error::ConfigError;

/// Production API endpoint used when `SIIGO_API_URL` is unset.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.siigo.com";

/// Validated connection settings for the Siigo API.
#[derive(Clone)]
pub(crate) struct Config {
    /// API user name (usually an e-mail address).
    pub(crate) username: String,
    /// API access key issued for the user.
    pub(crate) access_key: String,
    /// Value of the `Partner-Id` header identifying this integration.
    pub(crate) partner_id: String,
    /// Base URL without a trailing slash.
    pub(crate) base_url: String,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("access_key", &"<redacted>")
            .field("partner_id", &self.partner_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or invalid.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or invalid.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let username = required("SIIGO_USERNAME")?;
        let access_key = required("SIIGO_ACCESS_KEY")?;
        let partner_id = required("SIIGO_PARTNER_ID")?;
        if !is_valid_partner_id(&partner_id) {
            return Err(ConfigError::InvalidPartnerId(partner_id));
        }

        let base_url = lookup("SIIGO_API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        Ok(Self {
            username,
            access_key,
            partner_id,
            base_url,
        })
    }
}

/// Partner identifiers are 3 to 100 ASCII alphanumeric characters.
fn is_valid_partner_id(value: &str) -> bool {
    (3..=100).contains(&value.len()) && value.chars().all(|ch| ch.is_ascii_alphanumeric())
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect and inspects Debug output"
)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, DEFAULT_BASE_URL};
    use crate::error::ConfigError;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const COMPLETE: [(&str, &str); 3] = [
        ("SIIGO_USERNAME", "api@example.com"),
        ("SIIGO_ACCESS_KEY", "secret-key"),
        ("SIIGO_PARTNER_ID", "AcmeIntegration"),
    ];

    #[test]
    fn complete_config_uses_default_url() {
        let config = Config::from_lookup(lookup_from(&COMPLETE)).expect("valid config");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.partner_id, "AcmeIntegration");
        assert!(!format!("{config:?}").contains("secret-key"));
    }

    #[test]
    fn missing_access_key_is_reported() {
        let config = Config::from_lookup(lookup_from(&[
            ("SIIGO_USERNAME", "api@example.com"),
            ("SIIGO_PARTNER_ID", "AcmeIntegration"),
        ]));
        assert!(matches!(config, Err(ConfigError::Missing("SIIGO_ACCESS_KEY"))));
    }

    #[test]
    fn blank_username_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("SIIGO_USERNAME", "   "),
            ("SIIGO_ACCESS_KEY", "secret-key"),
            ("SIIGO_PARTNER_ID", "AcmeIntegration"),
        ]));
        assert!(matches!(config, Err(ConfigError::Missing("SIIGO_USERNAME"))));
    }

    #[test]
    fn partner_id_must_be_alphanumeric_and_bounded() {
        let too_long = "x".repeat(101);
        for bad in ["ab", "has-dash", "with space", too_long.as_str()] {
            let config = Config::from_lookup(lookup_from(&[
                ("SIIGO_USERNAME", "api@example.com"),
                ("SIIGO_ACCESS_KEY", "secret-key"),
                ("SIIGO_PARTNER_ID", bad),
            ]));
            assert!(
                matches!(config, Err(ConfigError::InvalidPartnerId(_))),
                "partner id {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn custom_base_url_is_trimmed() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("SIIGO_API_URL", "http://localhost:8080/"));
        let config = Config::from_lookup(lookup_from(&pairs)).expect("valid config");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push(("SIIGO_API_URL", "ftp://api.siigo.com"));
        let config = Config::from_lookup(lookup_from(&pairs));
        assert!(matches!(config, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn debug_output_redacts_access_key() {
        let config = Config::from_lookup(lookup_from(&COMPLETE));
        let rendered = config.map(|cfg| format!("{cfg:?}")).unwrap_or_default();
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret-key"));
    }
}
