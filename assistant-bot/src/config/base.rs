//! Base config: Telegram Bot connection, logging, file locations. Loaded from env.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Base config: Telegram-related, logging and on-disk paths only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// JSON table of localized start/help strings
    pub locales_file: PathBuf,
    /// Directory with the canned restart photo and pipe video
    pub assets_dir: PathBuf,
    /// Directory for per-chat generated images and downloaded voice notes
    pub tmp_dir: PathBuf,
    /// ALLOWED_USER_IDS (comma separated); empty allows everyone
    pub allowed_user_ids: Vec<i64>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN (or TELEGRAM_TOKEN) not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/log.txt".to_string());
        let locales_file = env::var("LOCALES_FILE")
            .unwrap_or_else(|_| "locales/ietf_langs.json".to_string())
            .into();
        let assets_dir = env::var("ASSETS_DIR")
            .unwrap_or_else(|_| "archive".to_string())
            .into();
        let tmp_dir = env::var("TMP_DIR").unwrap_or_else(|_| "tmp".to_string()).into();
        let allowed_user_ids = match env::var("ALLOWED_USER_IDS") {
            Ok(raw) => parse_user_ids(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            locales_file,
            assets_dir,
            tmp_dir,
            allowed_user_ids,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("Bot token is empty");
        }
        Ok(())
    }
}

fn parse_user_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("ALLOWED_USER_IDS contains an invalid id: {}", s))
        })
        .collect()
}
