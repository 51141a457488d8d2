use crate::bot::keyboards;
use crate::bot::notifier::Notifier;
use crate::database::models::{ReferralStats, ReferredUser};
use crate::ledger::ReferralLedger;
use crate::utils::{Formatter, Logger};
use log::{debug, error};
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::RequestError;

const NOT_REGISTERED_TEXT: &str = "请先发送 /start 完成注册。";
const GENERIC_ERROR_TEXT: &str = "❌ 处理请求时发生错误，请稍后重试。";

#[derive(Clone)]
pub struct ReferralHandler {
    ledger: ReferralLedger,
    notifier: Notifier,
    bot_username: String,
    list_limit: u32,
}

impl ReferralHandler {
    pub fn new(
        ledger: ReferralLedger,
        notifier: Notifier,
        bot_username: String,
        list_limit: u32,
    ) -> Self {
        Self {
            ledger,
            notifier,
            bot_username,
            list_limit,
        }
    }

    pub async fn handle_start(
        &self,
        bot: &Bot,
        message: &Message,
        payload: &str,
    ) -> Result<(), RequestError> {
        let Some(user) = message.from() else {
            return Ok(());
        };
        let user_id = user.id.0 as i64;

        let payload = payload.trim();
        let referral_code = if payload.is_empty() { None } else { Some(payload) };

        let text = match self
            .ledger
            .register(
                user_id,
                referral_code,
                user.username.as_deref(),
                Some(user.first_name.as_str()),
            )
            .await
        {
            Ok(report) => {
                if report.newly_registered {
                    Logger::log_user_registered(user_id, report.attributed_referrer);

                    if let Some(referrer_id) = report.attributed_referrer {
                        Logger::log_referral_attributed(referrer_id, user_id, self.ledger.reward());
                        self.spawn_referrer_notification(bot, referrer_id, user);
                    }
                }

                self.render_start(user_id, &report.stats)
            }
            Err(e) => {
                error!("Failed to register user {}: {}", user_id, e);
                GENERIC_ERROR_TEXT.to_string()
            }
        };

        let link = Formatter::format_invite_link(&self.bot_username, user_id);
        bot.send_message(message.chat.id, text)
            .reply_markup(keyboards::main_menu(&link))
            .await?;

        Ok(())
    }

    pub async fn handle_stats(&self, bot: &Bot, message: &Message) -> Result<(), RequestError> {
        let Some(user) = message.from() else {
            return Ok(());
        };
        let user_id = user.id.0 as i64;

        let text = self.stats_text(user_id).await;
        bot.send_message(message.chat.id, text).await?;

        Ok(())
    }

    pub async fn handle_referrals(&self, bot: &Bot, message: &Message) -> Result<(), RequestError> {
        let Some(user) = message.from() else {
            return Ok(());
        };
        let user_id = user.id.0 as i64;

        let text = self.referrals_text(user_id).await;
        bot.send_message(message.chat.id, text).await?;

        Ok(())
    }

    pub async fn handle_help(&self, bot: &Bot, message: &Message) -> Result<(), RequestError> {
        bot.send_message(message.chat.id, Self::help_text()).await?;
        Ok(())
    }

    /// 按钮回调与命令共用同一套内容，但在原消息上原地编辑
    pub async fn handle_callback(
        &self,
        bot: &Bot,
        query: &CallbackQuery,
    ) -> Result<(), RequestError> {
        let Some(data) = query.data.as_deref() else {
            bot.answer_callback_query(query.id.clone()).await?;
            return Ok(());
        };

        let user = &query.from;
        let user_id = user.id.0 as i64;
        debug!("Callback {} from user {}", data, user_id);

        let text = match data {
            "menu:start" => {
                // 按钮触发的注册与 /start 等价，只是不带邀请码
                match self
                    .ledger
                    .register(
                        user_id,
                        None,
                        user.username.as_deref(),
                        Some(user.first_name.as_str()),
                    )
                    .await
                {
                    Ok(report) => self.render_start(user_id, &report.stats),
                    Err(e) => {
                        error!("Failed to register user {} via callback: {}", user_id, e);
                        GENERIC_ERROR_TEXT.to_string()
                    }
                }
            }
            "menu:stats" => self.stats_text(user_id).await,
            "menu:referrals" => self.referrals_text(user_id).await,
            "menu:help" => Self::help_text().to_string(),
            _ => {
                debug!("Unknown callback data: {data}");
                bot.answer_callback_query(query.id.clone()).await?;
                return Ok(());
            }
        };

        if let Some(message) = &query.message {
            let link = Formatter::format_invite_link(&self.bot_username, user_id);
            if let Err(e) = bot
                .edit_message_text(message.chat.id, message.id, text)
                .reply_markup(keyboards::main_menu(&link))
                .await
            {
                // 内容未变化时 Telegram 会拒绝编辑，不视为失败
                debug!("Failed to edit message for callback: {e}");
            }
        }

        bot.answer_callback_query(query.id.clone()).await?;

        Ok(())
    }

    /// 后台尽力通知邀请人，通知状态只记日志，不影响注册回复
    fn spawn_referrer_notification(&self, bot: &Bot, referrer_id: i64, invitee: &teloxide::types::User) {
        let notifier = self.notifier.clone();
        let bot = bot.clone();
        let reward = self.ledger.reward();
        let invitee_name = Formatter::format_display_name(
            invitee.username.as_deref(),
            Some(invitee.first_name.as_str()),
            invitee.id.0 as i64,
        );

        tokio::spawn(async move {
            let _status = notifier
                .notify_referrer(&bot, referrer_id, &invitee_name, reward)
                .await;
        });
    }

    async fn stats_text(&self, user_id: i64) -> String {
        match self.ledger.stats(user_id).await {
            Ok(Some(stats)) => format!("📊 {}", Formatter::format_stats(&stats)),
            Ok(None) => NOT_REGISTERED_TEXT.to_string(),
            Err(e) => {
                error!("Failed to load stats for {}: {}", user_id, e);
                GENERIC_ERROR_TEXT.to_string()
            }
        }
    }

    async fn referrals_text(&self, user_id: i64) -> String {
        match self.ledger.list_referrals(user_id, self.list_limit).await {
            Ok(Some(referred)) => Self::render_referrals(&referred),
            Ok(None) => NOT_REGISTERED_TEXT.to_string(),
            Err(e) => {
                error!("Failed to list referrals for {}: {}", user_id, e);
                GENERIC_ERROR_TEXT.to_string()
            }
        }
    }

    fn render_start(&self, user_id: i64, stats: &ReferralStats) -> String {
        let link = Formatter::format_invite_link(&self.bot_username, user_id);
        format!(
            "👋 欢迎使用 ReferralBot！\n\n您的专属邀请链接：\n{}\n\n{}",
            link,
            Formatter::format_stats(stats)
        )
    }

    fn render_referrals(referred: &[ReferredUser]) -> String {
        if referred.is_empty() {
            return "您还没有邀请任何用户，把邀请链接分享出去吧！".to_string();
        }

        let mut lines = vec!["👥 您邀请的用户：".to_string()];
        for (index, user) in referred.iter().enumerate() {
            let name = Formatter::format_display_name(
                user.username.as_deref(),
                user.first_name.as_deref(),
                user.user_id,
            );
            lines.push(format!("{}. {}", index + 1, name));
        }

        lines.join("\n")
    }

    fn help_text() -> &'static str {
        "ReferralBot 帮助\n\n支持的命令：\n/start - 注册并获取邀请链接\n/stats - 查看邀请统计\n/referrals - 查看已邀请的用户\n/help - 显示帮助\n\n把您的邀请链接分享给朋友，对方通过链接加入后您将获得积分奖励。"
    }
}
