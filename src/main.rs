mod bot;
mod config;
mod database;
mod error;
mod ledger;
mod parser;
mod retry;
mod utils;

use log::info;
use anyhow::Result;
use dotenv::dotenv;

use config::Settings;
use database::DatabaseOperations;
use ledger::ReferralLedger;
use utils::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载环境变量
    dotenv().ok();

    // 初始化日志
    env_logger::init();

    Logger::log_operation_start("ReferralBot", "Initializing application");

    // 加载配置
    let settings = match Settings::new() {
        Ok(s) => {
            Logger::log_operation_success("Configuration", "Settings loaded successfully");
            s
        }
        Err(e) => {
            Logger::log_operation_failure("Configuration", &e.to_string());
            return Err(e);
        }
    };

    // 验证配置
    if let Err(e) = settings.validate() {
        Logger::log_operation_failure("Configuration validation", &e.to_string());
        return Err(e);
    }

    // 初始化数据库
    let db = match DatabaseOperations::new(&settings.database_url).await {
        Ok(db) => {
            Logger::log_operation_success("Database", "Database initialized successfully");
            db
        }
        Err(e) => {
            Logger::log_operation_failure("Database", &e.to_string());
            return Err(e);
        }
    };

    // 初始化邀请台账
    let ledger = ReferralLedger::new(db, settings.referral_reward);
    Logger::log_operation_success("ReferralLedger", "Ledger initialized successfully");

    info!("🤖 ReferralBot initialized successfully!");
    info!("📊 Configuration:");
    info!("  - Database: {}", settings.database_url);
    info!("  - Bot Name: {}", settings.bot_name);
    info!("  - Referral Reward: {}", settings.referral_reward);
    info!("  - Referral List Limit: {}", settings.referral_list_limit);

    // 启动消息处理
    bot::start_bot(&settings, ledger).await?;

    Ok(())
}
