use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_MAX_SESSIONS: usize = 1000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Replacement profile file; the embedded profile is used when unset.
    pub profile_path: Option<PathBuf>,
    pub max_sessions: usize,
    /// Open assistant sessions idle this long are dropped on the next open.
    pub session_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_any_env(&["GEMINI_API_KEY", "API_KEY"])?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profile_path: optional_env("PROFILE_PATH").map(PathBuf::from),
            max_sessions: match optional_env("MAX_SESSIONS") {
                Some(raw) => raw
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .context("MAX_SESSIONS must be a positive integer")?,
                None => DEFAULT_MAX_SESSIONS,
            },
            session_idle_ttl: Duration::from_secs(match optional_env("SESSION_IDLE_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .context("SESSION_IDLE_SECS must be a positive number of seconds")?,
                None => DEFAULT_SESSION_IDLE_SECS,
            }),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// First non-blank value among `keys`, in order.
fn require_any_env(keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| optional_env(key))
        .with_context(|| {
            format!(
                "Required environment variable '{}' is not set",
                keys.join("' or '")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_any_env_prefers_first_set_key() {
        std::env::set_var("VITAE_TEST_KEY_B", "second");
        assert_eq!(
            require_any_env(&["VITAE_TEST_KEY_A", "VITAE_TEST_KEY_B"]).unwrap(),
            "second"
        );
        std::env::set_var("VITAE_TEST_KEY_A", "first");
        assert_eq!(
            require_any_env(&["VITAE_TEST_KEY_A", "VITAE_TEST_KEY_B"]).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_require_any_env_names_every_key_when_missing() {
        std::env::set_var("VITAE_TEST_BLANK", "   ");
        let err = require_any_env(&["VITAE_TEST_MISSING", "VITAE_TEST_BLANK"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required environment variable 'VITAE_TEST_MISSING' or 'VITAE_TEST_BLANK' is not set"
        );
    }
}
