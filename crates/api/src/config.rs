use adscript_core::provider::FALLBACK_MODEL;
use adscript_llm::Endpoints;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. Vendor API keys are not configured here; they
/// live in the `api_settings` table.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). Generation runs in
    /// the foreground, so this must exceed the slowest vendor call.
    pub request_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Vendor base URLs.
    pub llm_endpoints: Endpoints,
    /// Model used when `api_settings.default_model` is blank.
    pub default_model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                   |
    /// | `PORT`                 | `3000`                                      |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                                       |
    /// | `GEMINI_API_BASE`      | `https://generativelanguage.googleapis.com` |
    /// | `OPENAI_API_BASE`      | `https://api.openai.com`                    |
    /// | `ANTHROPIC_API_BASE`   | `https://api.anthropic.com`                 |
    /// | `DEEPSEEK_API_BASE`    | `https://api.deepseek.com`                  |
    /// | `DEFAULT_MODEL`        | `gemini-1.5-flash`                          |
    ///
    /// See [`JwtConfig::from_env`] for the JWT variables.
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3001")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "300")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let defaults = Endpoints::default();
        let llm_endpoints = Endpoints {
            gemini: var("GEMINI_API_BASE", &defaults.gemini),
            openai: var("OPENAI_API_BASE", &defaults.openai),
            anthropic: var("ANTHROPIC_API_BASE", &defaults.anthropic),
            deepseek: var("DEEPSEEK_API_BASE", &defaults.deepseek),
        };

        let default_model = var("DEFAULT_MODEL", FALLBACK_MODEL);

        let jwt = JwtConfig::from_lookup(&lookup);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            llm_endpoints,
            default_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[("JWT_SECRET", "s")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 300);
        assert_eq!(config.cors_origins, vec!["http://localhost:3001"]);
        assert_eq!(config.default_model, "gemini-1.5-flash");
        assert_eq!(config.llm_endpoints, Endpoints::default());
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("JWT_SECRET", "s"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("OPENAI_API_BASE", "http://localhost:9000"),
            ("DEFAULT_MODEL", "gpt-4o-mini"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.llm_endpoints.openai, "http://localhost:9000");
        assert_eq!(config.default_model, "gpt-4o-mini");
    }

    #[test]
    #[should_panic(expected = "PORT must be a valid u16")]
    fn invalid_port_fails_fast() {
        config_from(&[("JWT_SECRET", "s"), ("PORT", "http")]);
    }
}
