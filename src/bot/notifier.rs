use crate::error::ReferralBotError;
use crate::retry::{retry_with_backoff, RetryConfig};
use crate::utils::Logger;
use log::warn;
use std::time::Duration;
use teloxide::{requests::Requester, types::ChatId, Bot};
use tokio::time::timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    Delivered,
    Failed,
}

impl NotifyStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotifyStatus::Delivered)
    }
}

#[derive(Clone)]
pub struct Notifier {
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 尽力而为地通知邀请人有新用户加入。
    ///
    /// 返回的状态只供调用方记录，随后可以丢弃；发送失败（被拉黑、超时）
    /// 不会向注册流程传播。
    pub async fn notify_referrer(
        &self,
        bot: &Bot,
        referrer_id: i64,
        invitee_name: &str,
        reward: i64,
    ) -> NotifyStatus {
        let chat_id = ChatId(referrer_id);
        let text = format!("🎉 您邀请的用户 {} 已加入，奖励 +{} 积分！", invitee_name, reward);

        let send = retry_with_backoff(
            || {
                let bot = bot.clone();
                let text = text.clone();
                async move {
                    bot.send_message(chat_id, text)
                        .await
                        .map(|_| ())
                        .map_err(ReferralBotError::from)
                }
            },
            RetryConfig::default(),
            "notify_referrer",
        );

        let status = match timeout(self.timeout, send).await {
            Ok(Ok(())) => NotifyStatus::Delivered,
            Ok(Err(e)) => {
                warn!("Failed to notify referrer {}: {}", referrer_id, e);
                NotifyStatus::Failed
            }
            Err(_) => {
                let e = ReferralBotError::notify_error(format!(
                    "notification timed out after {:?}",
                    self.timeout
                ));
                warn!("Failed to notify referrer {}: {}", referrer_id, e);
                NotifyStatus::Failed
            }
        };

        Logger::log_notification(referrer_id, status.is_delivered());
        status
    }
}
