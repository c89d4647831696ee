//! Configuration loading and constants.
//!
//! Loads application configuration from environment variables and defines
//! constants for token lifetime, default ports, and logging filters.
//! `AppConfig` is the root configuration struct containing all settings.
//!
//! Variable names are preserved from the original deployment for
//! compatibility: `COHERE_API_KEY`, `SUPABASE_URL`, `SUPABASE_KEY`,
//! `JWT_SECRET`, `DEBUG`, and `PORT`.

use thiserror::Error;

// =============================================================================
// Token Constants
// =============================================================================

/// Session token lifetime in seconds (24 hours)
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Scheme prefix expected in the Authorization header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Fallback signing secret used when `JWT_SECRET` is unset.
///
/// Kept for compatibility with existing deployments; a warning is logged at
/// startup when it is in use. It must never be relied on in production.
pub const DEFAULT_JWT_SECRET: &str = "default-secret";

// =============================================================================
// Server Constants
// =============================================================================

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8000;

/// Address the server binds to
pub const BIND_HOST: [u8; 4] = [0, 0, 0, 0];

// =============================================================================
// Logging Constants
// =============================================================================

/// Default log filter when neither the CLI flag nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "insideout_api=info";

/// Default log filter in debug mode
pub const DEBUG_LOG_FILTER: &str = "insideout_api=debug,tower_http=debug";

// =============================================================================
// Environment Variable Names
// =============================================================================

const ENV_COHERE_API_KEY: &str = "COHERE_API_KEY";
const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
const ENV_JWT_SECRET: &str = "JWT_SECRET";
const ENV_DEBUG: &str = "DEBUG";
const ENV_PORT: &str = "PORT";

/// Application configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AI provider API key; presence alone is reported, no liveness check
    pub cohere_api_key: Option<String>,
    /// Database REST endpoint base URL
    pub supabase_url: Option<String>,
    /// Database API key
    pub supabase_key: Option<String>,
    /// Symmetric secret for signing session tokens
    pub jwt_secret: String,
    /// Debug mode flag (`DEBUG=true`)
    pub debug: bool,
    /// HTTP listening port
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Missing credentials are not an error; the service starts in degraded
    /// mode and reports their absence through the status endpoints.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var(ENV_PORT) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let debug = std::env::var(ENV_DEBUG)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            cohere_api_key: non_empty_var(ENV_COHERE_API_KEY),
            supabase_url: non_empty_var(ENV_SUPABASE_URL),
            supabase_key: non_empty_var(ENV_SUPABASE_KEY),
            jwt_secret: non_empty_var(ENV_JWT_SECRET)
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            debug,
            port,
        })
    }

    /// Whether the AI provider credential is configured.
    ///
    /// This is a configuration-presence check only, never a connectivity
    /// check against the provider.
    pub fn ai_available(&self) -> bool {
        self.cohere_api_key.is_some()
    }

    /// Whether both database credentials are configured.
    pub fn has_database_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }

    /// Whether the insecure fallback signing secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Read an environment variable, treating empty values as absent.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests run in parallel within one process, so these build AppConfig
    // directly instead of mutating the process environment.

    fn config_with(cohere: Option<&str>, url: Option<&str>, key: Option<&str>) -> AppConfig {
        AppConfig {
            cohere_api_key: cohere.map(String::from),
            supabase_url: url.map(String::from),
            supabase_key: key.map(String::from),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            debug: false,
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn ai_available_reflects_key_presence() {
        assert!(config_with(Some("key"), None, None).ai_available());
        assert!(!config_with(None, None, None).ai_available());
    }

    #[test]
    fn database_credentials_require_both_values() {
        assert!(config_with(None, Some("https://db.example"), Some("k")).has_database_credentials());
        assert!(!config_with(None, Some("https://db.example"), None).has_database_credentials());
        assert!(!config_with(None, None, Some("k")).has_database_credentials());
    }

    #[test]
    fn default_secret_is_flagged() {
        let mut config = config_with(None, None, None);
        assert!(config.uses_default_secret());
        config.jwt_secret = "rotated".to_string();
        assert!(!config.uses_default_secret());
    }
}
