use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tagall_config::AppConfig;
use tagall_permissions::testing::RecordingChatClient;
use tagall_permissions::{CommandOutcome, InboundMessage, PermissionStore};
use tagall_runtime::TagallServices;
use tempfile::TempDir;

const GROUP: &str = "120363000000000009@g.us";

fn build_config(store_path: &Path, owner: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.path = store_path.to_path_buf();
    config.bot.name = "RuntimeBot".to_string();
    config.bot.owner_ids = vec![owner.to_string()];
    config
}

async fn initialise(config: &AppConfig) -> Result<TagallServices> {
    TagallServices::initialise(config)
        .await
        .context("failed to initialise tagall services")
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_does_not_create_the_document() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store_path = temp_dir.path().join("data/userGroupData.json");
    let config = build_config(&store_path, "15550000001");

    let services = initialise(&config).await?;

    assert!(!store_path.exists());
    assert!(!services.store.get_global_flag().await);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_owner_can_toggle_global_override() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store_path = temp_dir.path().join("data/userGroupData.json");
    let config = build_config(&store_path, "15550000001");

    let services = initialise(&config).await?;
    let client = Arc::new(RecordingChatClient::new());
    let service = services.tagall_service(client.clone());

    let outcome = service
        .handle(&InboundMessage::new(
            GROUP,
            "15550000001@s.whatsapp.net",
            "M1",
            ".tagall global on",
        ))
        .await
        .context("command should be recognised")?;

    assert!(matches!(outcome, CommandOutcome::GlobalFlagUpdated { enabled: true }));

    let on_disk: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&store_path)?)?;
    assert_eq!(on_disk["globalTagallAllowed"], serde_json::Value::Bool(true));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn broadcast_uses_configured_bot_identity() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = build_config(&temp_dir.path().join("userGroupData.json"), "15550000001");

    let services = initialise(&config).await?;
    let client = Arc::new(RecordingChatClient::new());
    client.set_participants(GROUP, ["1@s.whatsapp.net"]).await;
    let service = services.tagall_service(client.clone());

    let outcome = service
        .handle(&InboundMessage::new(GROUP, "15550000001@s.whatsapp.net", "M1", ".tagall"))
        .await
        .context("command should be recognised")?;

    assert!(matches!(outcome, CommandOutcome::Broadcast { mentioned: 1 }));
    let broadcast = client.last_message().await.context("broadcast should be sent")?;
    assert!(broadcast.text.contains("_Powered by RuntimeBot_"));
    Ok(())
}
