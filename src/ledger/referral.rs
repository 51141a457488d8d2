use crate::database::models::{ReferralStats, ReferredUser, RegistrationReport};
use crate::database::operations::DatabaseOperations;
use crate::parser::payload::PayloadParser;
use anyhow::Result;
use log::{debug, info};

#[derive(Clone, Debug)]
pub struct ReferralLedger {
    db: DatabaseOperations,
    parser: PayloadParser,
    reward: i64,
}

impl ReferralLedger {
    pub fn new(db: DatabaseOperations, reward: i64) -> Self {
        Self {
            db,
            parser: PayloadParser::new(),
            reward,
        }
    }

    /// 注册用户并结算邀请归因。
    ///
    /// 邀请码缺失、非数字或等于用户自身 ID 时一律按无邀请人处理；重复注册
    /// 幂等返回当前统计，不会再次归因。
    pub async fn register(
        &self,
        user_id: i64,
        referral_code: Option<&str>,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<RegistrationReport> {
        let referrer_id = match referral_code.and_then(|code| self.parser.parse_referral_code(code)) {
            Some(r) if r == user_id => {
                info!("Rejected self-referral from user {}", user_id);
                None
            }
            other => other,
        };

        let report = self
            .db
            .register_user(user_id, referrer_id, username, first_name, self.reward)
            .await?;

        if report.newly_registered {
            info!(
                "Registered user {} (referrer: {:?})",
                user_id, report.attributed_referrer
            );
        } else {
            debug!("Repeat /start from user {}, no re-attribution", user_id);
        }

        Ok(report)
    }

    /// 已注册用户的邀请人数与余额，未注册返回 None
    pub async fn stats(&self, user_id: i64) -> Result<Option<ReferralStats>> {
        self.db.get_stats(user_id).await
    }

    /// 按加入顺序列出被邀请的用户，未注册返回 None
    pub async fn list_referrals(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Option<Vec<ReferredUser>>> {
        self.db.list_referrals(user_id, limit).await
    }

    pub fn reward(&self) -> i64 {
        self.reward
    }
}
