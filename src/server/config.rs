//! Server runtime configuration
//!
//! Starts from the persisted `Settings` and lets environment variables (and
//! a `.env` file) override them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::config::Settings;

pub const LISTEN_ADDR_ENV: &str = "BELLAM_LISTEN_ADDR";
pub const STATIC_DIR_ENV: &str = "BELLAM_STATIC_DIR";
pub const CORS_ALLOW_ENV: &str = "BELLAM_CORS_ALLOW_ORIGINS";
pub const REQUEST_TIMEOUT_ENV: &str = "BELLAM_REQUEST_TIMEOUT_MS";
pub const SECURE_COOKIES_ENV: &str = "BELLAM_SECURE_COOKIES";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Allowed CORS origins; `*` allows any
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub session_ttl: Duration,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Build from settings, applying environment overrides
    pub fn from_env(settings: &Settings) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    /// Build from settings with an arbitrary variable source
    pub fn from_lookup(
        settings: &Settings,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let listen_addr = var(LISTEN_ADDR_ENV).unwrap_or_else(|| settings.listen_addr.clone());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", listen_addr))?;

        let static_dir = var(STATIC_DIR_ENV).unwrap_or_else(|| settings.static_dir.clone());

        let cors_allow = var(CORS_ALLOW_ENV)
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_ms = var(REQUEST_TIMEOUT_ENV)
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let secure_cookies = var(SECURE_COOKIES_ENV)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            static_dir: PathBuf::from(static_dir),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            session_ttl: Duration::from_secs(settings.session_ttl_minutes.saturating_mul(60)),
            secure_cookies,
        })
    }

    /// Override the listen address (CLI flag)
    pub fn with_listen_addr(mut self, addr: &str) -> anyhow::Result<Self> {
        self.listen_addr = addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", addr))?;
        Ok(self)
    }

    /// Override the static directory (CLI flag)
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}
