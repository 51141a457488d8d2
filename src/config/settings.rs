use std::env;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub bot_name: String,
    pub referral_reward: i64,
    pub referral_list_limit: u32,
    pub notify_timeout_secs: u64,
    pub log_level: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "referral.db".to_string());

        let bot_name = env::var("BOT_NAME")
            .unwrap_or_else(|_| "ReferralBot".to_string());

        let referral_reward = env::var("REFERRAL_REWARD")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<i64>()
            .unwrap_or(10);

        let referral_list_limit = env::var("REFERRAL_LIST_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .unwrap_or(10);

        let notify_timeout_secs = env::var("NOTIFY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .unwrap_or(5);

        let log_level = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Ok(Settings {
            telegram_bot_token,
            database_url,
            bot_name,
            referral_reward,
            referral_list_limit,
            notify_timeout_secs,
            log_level,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram_bot_token.is_empty() {
            return Err(anyhow!("Telegram bot token cannot be empty"));
        }

        if self.database_url.is_empty() {
            return Err(anyhow!("Database URL cannot be empty"));
        }

        if self.referral_reward <= 0 {
            return Err(anyhow!("Referral reward must be greater than 0"));
        }

        if self.referral_list_limit == 0 {
            return Err(anyhow!("Referral list limit must be greater than 0"));
        }

        if self.notify_timeout_secs == 0 {
            return Err(anyhow!("Notify timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            telegram_bot_token: String::new(),
            database_url: "referral.db".to_string(),
            bot_name: "ReferralBot".to_string(),
            referral_reward: 10,
            referral_list_limit: 10,
            notify_timeout_secs: 5,
            log_level: "info".to_string(),
        }
    }
}
