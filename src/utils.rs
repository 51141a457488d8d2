use log::{info, error};
use crate::database::models::ReferralStats;

/// 日志记录工具
pub struct Logger;

impl Logger {
    pub fn log_operation_start(operation: &str, details: &str) {
        info!("🚀 Starting {}: {}", operation, details);
    }

    pub fn log_operation_success(operation: &str, details: &str) {
        info!("✅ {} completed successfully: {}", operation, details);
    }

    pub fn log_operation_failure(operation: &str, error: &str) {
        error!("❌ {} failed: {}", operation, error);
    }

    pub fn log_user_registered(user_id: i64, referrer_id: Option<i64>) {
        match referrer_id {
            Some(referrer) => info!("👤 User Registered: {} | invited by {}", user_id, referrer),
            None => info!("👤 User Registered: {} | no referrer", user_id),
        }
    }

    pub fn log_referral_attributed(referrer_id: i64, invitee_id: i64, reward: i64) {
        info!(
            "💰 Referral Attributed: {} invited {} | +{} credits",
            referrer_id, invitee_id, reward
        );
    }

    pub fn log_notification(referrer_id: i64, delivered: bool) {
        if delivered {
            info!("📨 Referrer Notified: {}", referrer_id);
        } else {
            info!("📪 Referrer Notification Dropped: {}", referrer_id);
        }
    }
}

/// 格式化工具
pub struct Formatter;

impl Formatter {
    /// 生成个人邀请链接:固定前缀 + 用户自身 ID 作为 start 参数
    pub fn format_invite_link(bot_username: &str, user_id: i64) -> String {
        format!("https://t.me/{}?start={}", bot_username, user_id)
    }

    /// 格式化统计信息
    pub fn format_stats(stats: &ReferralStats) -> String {
        format!(
            "已邀请 {} 位用户，当前余额 {} 积分",
            stats.referral_count, stats.balance
        )
    }

    /// 被邀请用户的显示名称，资料未知时使用占位名
    pub fn format_display_name(
        username: Option<&str>,
        first_name: Option<&str>,
        user_id: i64,
    ) -> String {
        if let Some(username) = username {
            if !username.is_empty() {
                return format!("@{}", username);
            }
        }
        if let Some(first_name) = first_name {
            if !first_name.is_empty() {
                return first_name.to_string();
            }
        }
        format!("用户{}", user_id)
    }
}

/// 验证工具
pub struct Validator;

impl Validator {
    /// 验证用户ID
    pub fn is_valid_user_id(user_id: i64) -> bool {
        user_id > 0
    }

    /// 验证邀请码的形态（纯数字，长度合理）
    pub fn is_valid_referral_code(code: &str) -> bool {
        !code.is_empty() && code.len() <= 20 && code.chars().all(|c| c.is_ascii_digit())
    }

    /// 验证列表条数上限
    pub fn is_valid_limit(limit: u32) -> bool {
        limit > 0 && limit <= 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_invite_link() {
        assert_eq!(
            Formatter::format_invite_link("my_referral_bot", 42),
            "https://t.me/my_referral_bot?start=42"
        );
    }

    #[test]
    fn test_format_stats() {
        let stats = ReferralStats {
            referral_count: 3,
            balance: 30,
        };
        assert_eq!(Formatter::format_stats(&stats), "已邀请 3 位用户，当前余额 30 积分");
    }

    #[test]
    fn test_format_display_name() {
        assert_eq!(
            Formatter::format_display_name(Some("alice"), Some("Alice"), 1),
            "@alice"
        );
        assert_eq!(Formatter::format_display_name(None, Some("Alice"), 1), "Alice");
        assert_eq!(Formatter::format_display_name(None, None, 1), "用户1");
        assert_eq!(Formatter::format_display_name(Some(""), Some(""), 7), "用户7");
    }

    #[test]
    fn test_validators() {
        // 用户ID验证
        assert!(Validator::is_valid_user_id(1));
        assert!(!Validator::is_valid_user_id(0));
        assert!(!Validator::is_valid_user_id(-5));

        // 邀请码验证
        assert!(Validator::is_valid_referral_code("12345"));
        assert!(!Validator::is_valid_referral_code(""));
        assert!(!Validator::is_valid_referral_code("abc"));
        assert!(!Validator::is_valid_referral_code("12.5"));
        assert!(!Validator::is_valid_referral_code("123456789012345678901"));

        // 条数上限验证
        assert!(Validator::is_valid_limit(10));
        assert!(!Validator::is_valid_limit(0));
        assert!(!Validator::is_valid_limit(101));
    }
}
