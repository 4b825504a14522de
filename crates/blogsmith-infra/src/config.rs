//! Environment-driven configuration.
//!
//! All settings are read once at startup. The completion API key is required
//! and held as a [`SecretString`] so it never appears in Debug output.

use std::path::PathBuf;

use anyhow::Context;
use secrecy::SecretString;

/// Default model for the generation pipeline.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Runtime settings for the Blogsmith backend.
pub struct Settings {
    /// SQLite database URL.
    pub database_url: String,
    /// Completion API key (`OPENAI_API_KEY`).
    pub openai_api_key: SecretString,
    /// Model for the generation pipeline (`OPENAI_MODEL`).
    pub model: String,
    /// Optional override for OpenAI-compatible endpoints (`OPENAI_BASE_URL`).
    pub openai_base_url: Option<String>,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Fails fast when `OPENAI_API_KEY` is absent; everything else has a
    /// default.
    pub fn from_env() -> anyhow::Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is not set")?;

        let database_url = std::env::var("BLOGSMITH_DATABASE_URL")
            .unwrap_or_else(|_| default_database_url());

        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let openai_base_url = std::env::var("OPENAI_BASE_URL").ok();

        Ok(Self {
            database_url,
            openai_api_key: SecretString::from(openai_api_key),
            model,
            openai_base_url,
        })
    }

    /// Directory that must exist before the database file can be opened.
    ///
    /// `Some` only when the database URL is the managed default under the
    /// data dir. A caller-supplied `BLOGSMITH_DATABASE_URL` points wherever
    /// the caller chose, and its location is theirs to manage.
    pub fn managed_data_dir(&self) -> Option<PathBuf> {
        (self.database_url == default_database_url()).then(resolve_data_dir)
    }
}

/// Resolve the data directory: `BLOGSMITH_DATA_DIR` env var, falling back to
/// `~/.blogsmith`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BLOGSMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".blogsmith")
}

/// Default database URL under the resolved data directory.
pub fn default_database_url() -> String {
    format!(
        "sqlite://{}?mode=rwc",
        resolve_data_dir().join("blogsmith.db").display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url_shape() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("blogsmith.db"));
    }

    fn settings_with_url(url: &str) -> Settings {
        Settings {
            database_url: url.to_string(),
            openai_api_key: SecretString::from("sk-test"),
            model: "gpt-3.5-turbo".to_string(),
            openai_base_url: None,
        }
    }

    #[test]
    fn test_managed_data_dir_for_default_url() {
        let settings = settings_with_url(&default_database_url());
        assert_eq!(settings.managed_data_dir(), Some(resolve_data_dir()));
    }

    #[test]
    fn test_no_managed_data_dir_for_custom_url() {
        let settings = settings_with_url("sqlite:///srv/blog/blog.db?mode=rwc");
        assert_eq!(settings.managed_data_dir(), None);
    }

    #[test]
    fn test_resolve_data_dir_env_override() {
        // SAFETY: test-local variable name, cleaned up immediately.
        unsafe { std::env::set_var("BLOGSMITH_DATA_DIR", "/tmp/blogsmith-test") };
        let dir = resolve_data_dir();
        unsafe { std::env::remove_var("BLOGSMITH_DATA_DIR") };
        assert_eq!(dir, PathBuf::from("/tmp/blogsmith-test"));
    }
}
