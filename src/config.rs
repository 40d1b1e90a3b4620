//! Process configuration, loaded once at startup and passed into
//! constructors rather than read ambiently.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Everything the notifier needs to reach its collaborators.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub notion_token: String,
    pub database_id: String,
    /// Chat the announcements are delivered to.
    pub whatsapp_group_id: String,
    pub whatsapp_access_token: String,
    pub whatsapp_phone_number_id: String,
    /// Override for tests; defaults to the public Notion host.
    pub notion_api_base: Option<String>,
    /// Override for tests; defaults to the public Graph host.
    pub whatsapp_api_base: Option<String>,
}

impl NotifierConfig {
    /// Load from the process environment (and `.env` when present).
    ///
    /// A missing required variable is a startup fault; nothing else runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            notion_token: require("NOTION_TOKEN")?,
            database_id: require("DATABASE_ID")?,
            whatsapp_group_id: require("WHATSAPP_GROUP_ID")?,
            whatsapp_access_token: require("WHATSAPP_ACCESS_TOKEN")?,
            whatsapp_phone_number_id: require("WHATSAPP_PHONE_NUMBER_ID")?,
            notion_api_base: optional("NOTION_API_BASE_URL"),
            whatsapp_api_base: optional("WHATSAPP_API_BASE_URL"),
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
