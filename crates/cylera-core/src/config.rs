//! Client configuration.
//!
//! Credentials come from the `CYLERA_BASE_URL`, `CYLERA_USERNAME` and
//! `CYLERA_PASSWORD` environment variables (a `.env` file is loaded by
//! the CLI before this runs). All three must be present and non-empty
//! before any network call is attempted.

use crate::api::CyleraError;

/// Environment variables holding the connection settings.
pub const ENV_BASE_URL: &str = "CYLERA_BASE_URL";
pub const ENV_USERNAME: &str = "CYLERA_USERNAME";
pub const ENV_PASSWORD: &str = "CYLERA_PASSWORD";

/// Connection settings for the Cylera Partner API.
/// Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
    /// Build a config from explicit values. Trailing slashes on the
    /// base URL are trimmed so paths can be joined with a single `/`.
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Load the config from the process environment.
    pub fn from_env() -> Result<Self, CyleraError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config through an injectable variable lookup.
    /// `from_env` delegates here; tests pass a closure over a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CyleraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = [ENV_BASE_URL, ENV_USERNAME, ENV_PASSWORD]
            .into_iter()
            .filter(|name| lookup(name).map_or(true, |v| v.trim().is_empty()))
            .collect();

        if !missing.is_empty() {
            return Err(CyleraError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        // Unwraps are safe: the filter above proved all three are present.
        Ok(Self::new(
            &lookup(ENV_BASE_URL).unwrap(),
            &lookup(ENV_USERNAME).unwrap(),
            &lookup(ENV_PASSWORD).unwrap(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(base: &str, user: &str, pass: &str) -> impl Fn(&str) -> Option<String> {
        let (base, user, pass) = (base.to_string(), user.to_string(), pass.to_string());
        move |name| match name {
            ENV_BASE_URL => Some(base.clone()).filter(|v| !v.is_empty()),
            ENV_USERNAME => Some(user.clone()).filter(|v| !v.is_empty()),
            ENV_PASSWORD => Some(pass.clone()).filter(|v| !v.is_empty()),
            _ => None,
        }
    }

    #[test]
    fn loads_complete_config() {
        let config = Config::from_lookup(vars(
            "https://partner.us1.cylera.com/",
            "user@example.com",
            "hunter2",
        ))
        .unwrap();
        assert_eq!(config.base_url, "https://partner.us1.cylera.com");
        assert_eq!(config.username, "user@example.com");
    }

    #[test]
    fn reports_all_missing_variables() {
        let err = Config::from_lookup(vars("", "user@example.com", "")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(ENV_BASE_URL));
        assert!(message.contains(ENV_PASSWORD));
        assert!(!message.contains(ENV_USERNAME));
    }

    #[test]
    fn whitespace_only_value_counts_as_missing() {
        let err = Config::from_lookup(vars("https://x", "  ", "p")).unwrap_err();
        assert!(err.to_string().contains(ENV_USERNAME));
    }
}
