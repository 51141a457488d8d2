use anyhow::Result;
use log::{debug, error, info};
use std::time::Duration;
use teloxide::{
    prelude::*,
    types::CallbackQuery,
    utils::command::BotCommands,
    RequestError,
};

use crate::bot::commands::Commands;
use crate::bot::handler::ReferralHandler;
use crate::bot::notifier::Notifier;
use crate::config::Settings;
use crate::ledger::ReferralLedger;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "支持的命令:")]
pub enum Command {
    #[command(description = "注册并获取邀请链接")]
    Start(String),
    #[command(description = "查看邀请统计")]
    Stats,
    #[command(description = "查看已邀请的用户")]
    Referrals,
    #[command(description = "显示帮助信息")]
    Help,
}

pub struct BotDispatcher {
    handler: ReferralHandler,
    commands: Commands,
}

impl BotDispatcher {
    pub fn new(handler: ReferralHandler) -> Self {
        let commands = Commands::new(handler.clone());
        Self { handler, commands }
    }

    pub async fn run(self, bot: Bot) -> Result<()> {
        info!("🤖 Starting ReferralBot dispatcher...");

        let handler = self.handler.clone();
        let commands = self.commands.clone();

        Dispatcher::builder(
            bot,
            dptree::entry()
                .branch(
                    Update::filter_message()
                        .branch(dptree::entry().filter_command::<Command>().endpoint(
                            move |bot: Bot, msg: Message, cmd: Command| {
                                let commands = commands.clone();
                                async move {
                                    debug!("Handling command: {cmd:?}");

                                    if let Err(e) = commands.handle_command(&bot, &msg, cmd).await {
                                        error!("Failed to handle command: {e}");
                                    }

                                    Ok::<(), RequestError>(())
                                }
                            },
                        ))
                        .branch(
                            dptree::filter(|msg: Message| {
                                msg.chat.is_private() && msg.text().is_some()
                            })
                            .endpoint(|bot: Bot, msg: Message| async move {
                                debug!("Non-command message from chat {}", msg.chat.id);

                                // 私聊里的普通文本给出指引
                                if let Err(e) = bot
                                    .send_message(msg.chat.id, "发送 /help 查看可用命令。")
                                    .await
                                {
                                    error!("Failed to send hint message: {e}");
                                }

                                Ok::<(), RequestError>(())
                            }),
                        ),
                )
                .branch(Update::filter_callback_query().endpoint(
                    move |bot: Bot, query: CallbackQuery| {
                        let handler = handler.clone();
                        async move {
                            if let Err(e) = handler.handle_callback(&bot, &query).await {
                                error!("Failed to handle callback query: {e}");
                            }

                            Ok::<(), RequestError>(())
                        }
                    },
                )),
        )
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

        Ok(())
    }
}

/// 启动机器人的主函数
pub async fn start_bot(settings: &Settings, ledger: ReferralLedger) -> Result<()> {
    info!("🚀 Initializing Telegram Bot...");

    let bot = Bot::new(&settings.telegram_bot_token);

    // 获取机器人信息，邀请链接需要机器人用户名
    let me = match bot.get_me().await {
        Ok(me) => {
            info!("✅ Bot connected successfully:");
            info!("  - Username: @{}", me.username());
            info!("  - Name: {}", me.first_name);
            info!("  - ID: {}", me.id);
            me
        }
        Err(e) => {
            error!("❌ Failed to connect to Telegram Bot API: {e}");
            return Err(anyhow::anyhow!("Bot connection failed: {}", e));
        }
    };

    let notifier = Notifier::new(Duration::from_secs(settings.notify_timeout_secs));
    let handler = ReferralHandler::new(
        ledger,
        notifier,
        me.username().to_string(),
        settings.referral_list_limit,
    );

    // 创建并启动调度器
    let dispatcher = BotDispatcher::new(handler);

    info!("🎯 Starting update processing...");
    info!("💡 Bot is now ready to receive messages!");
    info!("📝 Send /start to get your personal invite link.");

    dispatcher.run(bot).await?;

    Ok(())
}
