use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Default production CSV with the relevant session events.
const DEFAULT_EVENTS_URL: &str =
    "https://behaviorally-testing.s3.amazonaws.com/sankey_relevant_session_v2.csv";

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            source: SourceConfig::from_env(),
        }
    }

    /// Print a startup summary.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  server:  host={}, port={}",
            self.server.host,
            self.server.port
        );
        tracing::info!("  source:  {}", self.source.describe());
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 3001),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── Event source ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Remote CSV with the raw event rows.
    pub events_url: String,
    /// Local file override; when set it wins over the URL.
    pub events_file: Option<String>,
}

impl SourceConfig {
    fn from_env() -> Self {
        Self {
            events_url: env_or("EVENTS_URL", DEFAULT_EVENTS_URL),
            events_file: env_opt("EVENTS_FILE"),
        }
    }

    pub fn describe(&self) -> String {
        match &self.events_file {
            Some(path) => format!("file={}", path),
            None => format!("url={}", self.events_url),
        }
    }
}
