//! Process-wide configuration loaded once at startup.
//!
//! Values come from the environment, optionally seeded from a `.env` file.
//! Secrets are held as [`SecretString`] and handed to adapter constructors;
//! nothing here is written back.

use secrecy::{ExposeSecret, SecretString};

/// Default model used for both the generation and the evaluation pass.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
/// Default base URL of the chat-completions API.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
/// Placeholder Jira server shown until the user supplies their own.
pub const DEFAULT_JIRA_URL: &str = "https://your-domain.atlassian.net";
/// Placeholder Jira username.
pub const DEFAULT_JIRA_USER: &str = "your-email@example.com";
/// Placeholder Jira project key.
pub const DEFAULT_JIRA_PROJECT_KEY: &str = "PROJ";

/// User-editable Jira settings: the three fields of the configuration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraSettings {
    /// Base URL of the Jira server.
    pub url: String,
    /// Jira username; used for authentication and as reporter/assignee.
    pub user: String,
    /// Key of the project tickets are filed under.
    pub project_key: String,
}

impl Default for JiraSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_JIRA_URL.to_string(),
            user: DEFAULT_JIRA_USER.to_string(),
            project_key: DEFAULT_JIRA_PROJECT_KEY.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// API key for the text-generation service.
    pub openai_api_key: Option<SecretString>,
    /// Base URL of the text-generation service, always ending in `/`.
    pub openai_base_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// API token for the issue tracker.
    pub jira_api_token: Option<SecretString>,
    /// Initial Jira settings.
    pub jira: JiraSettings,
}

impl AppConfig {
    /// Loads configuration from `.env` (if present) and the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secret = |key: &str| get(key).map(|v| SecretString::new(v.into_boxed_str()));

        let defaults = JiraSettings::default();
        Self {
            openai_api_key: secret("OPENAI_API_KEY"),
            openai_base_url: normalize_base_url(
                &get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ),
            model: get("T3PO_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            jira_api_token: secret("JIRA_API_TOKEN"),
            jira: JiraSettings {
                url: get("JIRA_URL").unwrap_or(defaults.url),
                user: get("JIRA_USER").unwrap_or(defaults.user),
                project_key: get("JIRA_PROJECT_KEY").unwrap_or(defaults.project_key),
            },
        }
    }
}

/// Copies a secret so two adapters can each own one.
pub(crate) fn duplicate_secret(secret: &SecretString) -> SecretString {
    SecretString::new(secret.expose_secret().into())
}

/// Ensures the base URL ends with a slash so relative joins keep its path.
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_placeholders() {
        let config = config_from(&[]);
        assert!(config.openai_api_key.is_none());
        assert!(config.jira_api_token.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.jira, JiraSettings::default());
    }

    #[test]
    fn reads_secrets_and_settings() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("JIRA_API_TOKEN", "jira-token"),
            ("JIRA_URL", "https://acme.atlassian.net"),
            ("JIRA_USER", "alice"),
            ("JIRA_PROJECT_KEY", "ACME"),
            ("T3PO_MODEL", "gpt-4o"),
        ]);
        assert_eq!(config.openai_api_key.unwrap().expose_secret(), "sk-test");
        assert_eq!(config.jira_api_token.unwrap().expose_secret(), "jira-token");
        assert_eq!(config.jira.url, "https://acme.atlassian.net");
        assert_eq!(config.jira.user, "alice");
        assert_eq!(config.jira.project_key, "ACME");
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "  "), ("JIRA_USER", "")]);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.jira.user, DEFAULT_JIRA_USER);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = config_from(&[("OPENAI_BASE_URL", "http://localhost:8080/v1")]);
        assert_eq!(config.openai_base_url, "http://localhost:8080/v1/");
    }
}
