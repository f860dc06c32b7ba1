use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::Store;
use crate::fallback::FallbackDataset;

/// Process-wide dependencies shared by every handler: the configuration,
/// the optional persistent store, the immutable fallback dataset, and the
/// token service.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    /// `None` when no store is configured, or when the store was unreachable
    /// at startup and fallback mode is on.
    pub store: Option<Store>,

    pub fallback: Arc<FallbackDataset>,

    pub tokens: TokenService,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = if config.general.database_path.is_empty() {
            info!("No database configured, serving the fallback dataset");
            None
        } else {
            let connected = Store::with_pool_options(
                &config.general.database_path,
                config.general.max_db_connections,
                config.general.min_db_connections,
            )
            .await;

            match connected {
                Ok(store) => Some(store),
                Err(e) if config.fallback.enabled => {
                    warn!("Database unavailable, degrading to fallback dataset: {e:#}");
                    None
                }
                Err(e) => {
                    return Err(e).context("Database connection failed and fallback mode is off");
                }
            }
        };

        let tokens = TokenService::new(&config.auth.token_secret, config.auth.token_ttl_seconds);

        Ok(Self {
            config,
            store,
            fallback: Arc::new(FallbackDataset::seeded()),
            tokens,
        })
    }
}
