//! Medical records console.
//!
//! ## Purpose
//! Interactive, single-user menu for keeping a list of medical records in memory and saving it
//! to or loading it from a binary records file.
//!
//! ## Environment Variables
//! - `MEDREC_DATA_DIR`: directory that relative save/load file names resolve against (default:
//!   current directory)
//! - `RUST_LOG`: log filter (default: `medrec=warn`). Logs go to stderr so the menu on stdout
//!   stays readable.
//!
//! A `.env` file in the working directory is read first if present.

mod console;
mod prompt;

use anyhow::Context;
use console::Console;
use medrec_core::config::store_config_from_env_value;
use medrec_core::constants::DATA_DIR_ENV;
use medrec_core::{RecordStore, StoreConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the medical records console
///
/// Resolves configuration once, builds an empty record store, and hands both to the menu loop.
/// The process exits with status 0 on every path, including when configuration is invalid (the
/// current directory is used instead) or the console output fails.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medrec=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = resolve_store_config().unwrap_or_else(|e| {
        tracing::warn!("{:#}; using the current directory", e);
        StoreConfig::default()
    });
    tracing::debug!("records files resolve against {}", cfg.data_dir().display());

    let store = RecordStore::new(cfg);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(store, stdin.lock(), stdout.lock());

    if let Err(e) = console.run() {
        tracing::error!("console output failed: {}", e);
    }
    tracing::debug!(state = ?console.state(), "menu loop finished");

    let (store, _) = console.into_parts();
    tracing::info!(discarded = store.len(), "session ended");

    Ok(())
}

fn resolve_store_config() -> anyhow::Result<StoreConfig> {
    let value = std::env::var(DATA_DIR_ENV).ok();
    store_config_from_env_value(value).with_context(|| format!("invalid {DATA_DIR_ENV}"))
}
