//! HTTP server for Bellam Finance
//!
//! An axum router exposing the JSON API used by the browser frontend, with
//! static files served for everything outside `/api`.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;

pub use api::app_router;
pub use config::ServerConfig;
pub use session::SessionStore;

use std::sync::Arc;

use tokio::task;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;
use error::ApiResult;

pub const LOG_FORMAT_ENV: &str = "BELLAM_LOG_FORMAT";

/// Shared state behind every handler
pub struct AppState {
    pub storage: Storage,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(storage: Storage, config: &ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            storage,
            sessions: SessionStore::new(config.session_ttl, config.secure_cookies),
        })
    }
}

/// Run disk or password-hashing work on the blocking pool
pub(crate) async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> ApiResult<T>
where
    F: FnOnce(&AppState) -> FinanceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result = task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| FinanceError::Storage(format!("Blocking task failed: {}", e)))?;
    Ok(result?)
}

/// Install the global subscriber: `RUST_LOG` filter, JSON or text output
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    // A subscriber may already be installed (tests, embedding)
    let result = if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>, config: ServerConfig) -> anyhow::Result<()> {
    let router = app_router(state, &config);

    tracing::info!(
        addr = %config.listen_addr,
        static_dir = %config.static_dir.display(),
        "Bellam Finance listening"
    );
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{MemberInput, Money, UserId};
    use crate::services::MemberService;
    use tempfile::TempDir;

    fn state(temp_dir: &TempDir) -> Arc<AppState> {
        let storage = Storage::open(temp_dir.path().join("database.json")).unwrap();
        let config = ServerConfig::from_lookup(&Settings::default(), |_| None).unwrap();
        AppState::new(storage, &config)
    }

    #[tokio::test]
    async fn test_run_blocking_writes_through_storage() {
        let temp_dir = TempDir::new().unwrap();
        let state = state(&temp_dir);
        let owner = UserId::from_raw(1);

        let member = run_blocking(&state, move |state| {
            MemberService::new(&state.storage)
                .create(owner, MemberInput::new("Asha", Money::from_units(50000)))
        })
        .await
        .unwrap();

        assert_eq!(member.name, "Asha");
        assert!(temp_dir.path().join("database.json").exists());
        assert_eq!(state.storage.read(|db| db.family_members.len()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_run_blocking_propagates_errors() {
        let temp_dir = TempDir::new().unwrap();
        let state = state(&temp_dir);

        let result: ApiResult<()> = run_blocking(&state, |_| {
            Err(FinanceError::Validation("Salary cannot be negative".into()))
        })
        .await;

        assert!(matches!(
            result,
            Err(error::ApiError::Finance(FinanceError::Validation(_)))
        ));
    }
}
