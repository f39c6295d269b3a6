pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod ids;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::SharedState;

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Brings the history database up to date and checks it is reachable.
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    info!(
        "gitweb-history v{} preparing {}",
        env!("CARGO_PKG_VERSION"),
        config.general.database_path
    );

    let state = SharedState::new(&config).await?;
    state.store.ping().await?;

    info!("History store ready");
    Ok(())
}
