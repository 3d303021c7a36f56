//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_core::services::DEFAULT_MODEL;
use quill_infra::DatabaseConfig;

const DEFAULT_ADMIN_PASSWORD: &str = "change-me";
const DEFAULT_SESSION_SECRET: &str = "change-me-in-production";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub admin_password: String,
    pub session: SessionConfig,
    pub assist: AssistConfig,
    pub subscribe_limit: SubscribeLimitConfig,
}

/// Admin session token settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Writing assistant settings. No key means the assistant is unavailable.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Quota for `POST /api/subscribers`, per client address.
#[derive(Debug, Clone)]
pub struct SubscribeLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
    /// Take the client address from forwarding headers. Only safe behind a proxy that sets them.
    pub trust_proxy: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 2),
        });

        let admin_password = secret_or_default("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        let session = SessionConfig {
            secret: secret_or_default("SESSION_SECRET", DEFAULT_SESSION_SECRET),
            ttl_hours: parse_or("SESSION_TTL_HOURS", 12),
        };

        let assist = AssistConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_or("GEMINI_TIMEOUT_SECS", 30)),
        };

        let subscribe_limit = SubscribeLimitConfig {
            max_requests: parse_or("SUBSCRIBE_RATE_LIMIT_MAX", 10),
            window: Duration::from_secs(parse_or("SUBSCRIBE_RATE_LIMIT_WINDOW_SECS", 60)),
            trust_proxy: parse_or("TRUST_PROXY", false),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            admin_password,
            session,
            assist,
            subscribe_limit,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Read a secret, warning loudly when the built-in default is used.
fn secret_or_default(key: &str, default: &str) -> String {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());

    if value == default {
        let is_production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        if is_production {
            tracing::error!("SECURITY: Using default {key} in production! Set {key}.");
        } else {
            tracing::warn!("Using default {key}. Set {key} for production use.");
        }
    }

    value
}
