//! `serve` command: run the HTTP server

use anyhow::Context;
use clap::Args;

use crate::config::{FinancePaths, Settings};
use crate::server::{self, AppState, ServerConfig};
use crate::storage::Storage;

/// Arguments for `serve`
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind, overriding settings and environment
    #[arg(short, long)]
    pub listen: Option<String>,
    /// Directory of static frontend files
    #[arg(long)]
    pub static_dir: Option<String>,
}

/// Start the server on a multi-threaded runtime and block until shutdown
pub fn handle_serve_command(
    paths: &FinancePaths,
    settings: &Settings,
    args: ServeArgs,
) -> anyhow::Result<()> {
    server::init_tracing();

    let mut config = ServerConfig::from_env(settings)?;
    if let Some(addr) = args.listen.as_deref() {
        config = config.with_listen_addr(addr)?;
    }
    if let Some(dir) = args.static_dir {
        config = config.with_static_dir(dir);
    }

    let storage = Storage::new(paths).context("Failed to open database")?;
    tracing::info!(database = %storage.path().display(), "database opened");
    let state = AppState::new(storage, &config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(server::serve(state, config))
}
