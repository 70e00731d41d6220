use anyhow::Context;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "tagall.toml",
    "config/tagall.toml",
    "crates/config/tagall.toml",
    "../tagall.toml",
    "../config/tagall.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

/// Where the shared permission document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "StoreConfig::default_path")]
    pub path: PathBuf,
}

impl StoreConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("data/userGroupData.json")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

/// Bot identity and the accounts treated as bot owner.
///
/// ```
/// use tagall_config::BotConfig;
///
/// let bot = BotConfig::default();
/// assert_eq!(bot.name, "AchekBot");
/// assert!(bot.owner_ids.is_empty());
/// assert!(bot.sudo_ids.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_name")]
    pub name: String,
    #[serde(default = "BotConfig::default_website")]
    pub website: String,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub owner_ids: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub sudo_ids: Vec<String>,
}

impl BotConfig {
    fn default_name() -> String {
        "AchekBot".to_string()
    }

    fn default_website() -> String {
        "https://achek.com.ng".to_string()
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            website: Self::default_website(),
            owner_ids: Vec::new(),
            sudo_ids: Vec::new(),
        }
    }
}

/// Accepts a list of identifiers or a single comma separated value, so
/// `TAGALL__BOT__OWNER_IDS=111,222` works alongside TOML arrays.
fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdList;

    impl<'de> Visitor<'de> for IdList {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a list of identifiers or a comma separated string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut ids = Vec::new();
            while let Some(id) = seq.next_element::<String>()? {
                ids.push(id);
            }
            Ok(ids)
        }
    }

    deserializer.deserialize_any(IdList)
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use tagall_config::load;
///
/// std::env::remove_var("TAGALL_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.bot.name.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default(
            "store.path",
            defaults.store.path.to_string_lossy().into_owned(),
        )
        .context("invalid default for store.path")?
        .set_default("bot.name", defaults.bot.name.clone())
        .context("invalid default for bot.name")?
        .set_default("bot.website", defaults.bot.website.clone())
        .context("invalid default for bot.website")?;

    let environment_overrides = config::Environment::with_prefix("TAGALL").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("TAGALL_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via TAGALL_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded tagall configuration");
    Ok(config)
}
