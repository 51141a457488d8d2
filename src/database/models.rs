use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub referrer_id: Option<i64>, // 首次注册时写入，之后不再变更
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub balance: i64,
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    pub referral_count: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferredUser {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// 一次注册调用的结果
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub newly_registered: bool,
    pub attributed_referrer: Option<i64>, // 本次成功归因的邀请人（仅新注册时可能有值）
    pub stats: ReferralStats,
}
