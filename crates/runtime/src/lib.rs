use std::sync::Arc;

use anyhow::{Context, Result};
use tagall_config::AppConfig;
use tagall_permissions::{
    BroadcastTemplate, ChatClient, ConfiguredOwners, JsonFilePermissionStore, PermissionStore,
    TagallService,
};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Shared pieces every `.tagall` handler needs, built once from configuration
#[derive(Clone)]
pub struct TagallServices {
    pub store: Arc<dyn PermissionStore>,
    pub owners: Arc<ConfiguredOwners>,
    pub template: BroadcastTemplate,
}

impl TagallServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let path = config.store.path.clone();
        let exists = tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("failed to inspect permission document {}", path.display()))?;

        if exists {
            info!(path = %path.display(), "using existing permission document");
        } else {
            info!(path = %path.display(), "permission document will be created on first write");
        }

        let owners = ConfiguredOwners::from_bot_config(&config.bot);
        info!(
            owners = config.bot.owner_ids.len(),
            sudo = config.bot.sudo_ids.len(),
            "owner directory ready"
        );

        Ok(Self {
            store: Arc::new(JsonFilePermissionStore::new(path)),
            owners: Arc::new(owners),
            template: BroadcastTemplate::from_bot_config(&config.bot),
        })
    }

    /// Command service bound to a chat client
    pub fn tagall_service(&self, client: Arc<dyn ChatClient>) -> TagallService {
        TagallService::new(
            self.store.clone(),
            client,
            self.owners.clone(),
            self.template.clone(),
        )
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
