use crate::database::models::{ReferralStats, ReferredUser, RegistrationReport, UserRecord};
use rusqlite::{Connection, params};
use std::sync::Arc;
use tokio::sync::Mutex;
use anyhow::Result;
use log::{debug, info};
use chrono::Utc;

#[derive(Clone, Debug)]
pub struct DatabaseOperations {
    conn: Arc<Mutex<Connection>>,
}

impl DatabaseOperations {
    pub async fn new(database_url: &str) -> Result<Self> {
        let conn = Connection::open(database_url)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().await;

        // 创建用户表
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                referrer_id INTEGER,
                username TEXT,
                first_name TEXT,
                balance INTEGER NOT NULL DEFAULT 0,
                joined_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        // 邀请人数统计依赖该索引
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_referrer_id ON users(referrer_id)",
            [],
        )?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// 注册用户并在必要时给邀请人计酬。
    ///
    /// 存在性检查、插入和邀请人加酬在同一把锁内完成，保证同一个新用户的
    /// 并发 start 事件不会给邀请人重复计酬。
    pub async fn register_user(
        &self,
        user_id: i64,
        referrer_id: Option<i64>,
        username: Option<&str>,
        first_name: Option<&str>,
        reward: i64,
    ) -> Result<RegistrationReport> {
        let conn = self.conn.lock().await;

        // 已注册用户:幂等返回当前统计，不做任何再归因
        if Self::get_user_sync(&conn, user_id)?.is_some() {
            debug!("User {} already registered, skipping creation", user_id);
            let stats = Self::get_stats_sync(&conn, user_id)?.unwrap_or(ReferralStats {
                referral_count: 0,
                balance: 0,
            });
            return Ok(RegistrationReport {
                newly_registered: false,
                attributed_referrer: None,
                stats,
            });
        }

        // 自我邀请在存储边界同样视为无邀请人
        let referrer_id = referrer_id.filter(|r| *r != user_id);

        // 严格归因:邀请人必须已有记录，未知邀请人静默丢弃
        let attributed = match referrer_id {
            Some(r) => {
                if Self::get_user_sync(&conn, r)?.is_some() {
                    Some(r)
                } else {
                    debug!("Referrer {} is not registered, dropping attribution", r);
                    None
                }
            }
            None => None,
        };

        let now = Utc::now();
        conn.execute(
            "INSERT INTO users (user_id, referrer_id, username, first_name, balance, joined_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![user_id, attributed, username, first_name, now],
        )?;
        debug!("Created user record: {} (referrer: {:?})", user_id, attributed);

        if let Some(r) = attributed {
            conn.execute(
                "UPDATE users SET balance = balance + ?1 WHERE user_id = ?2",
                params![reward, r],
            )?;
            info!("Credited referrer {} with {} for inviting {}", r, reward, user_id);
        }

        let stats = Self::get_stats_sync(&conn, user_id)?.unwrap_or(ReferralStats {
            referral_count: 0,
            balance: 0,
        });

        Ok(RegistrationReport {
            newly_registered: true,
            attributed_referrer: attributed,
            stats,
        })
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let conn = self.conn.lock().await;
        Self::get_user_sync(&conn, user_id)
    }

    /// 返回已注册用户的统计，未注册用户返回 None
    pub async fn get_stats(&self, user_id: i64) -> Result<Option<ReferralStats>> {
        let conn = self.conn.lock().await;
        Self::get_stats_sync(&conn, user_id)
    }

    /// 按加入顺序返回最多 limit 个被邀请用户，未注册用户返回 None
    pub async fn list_referrals(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Option<Vec<ReferredUser>>> {
        let conn = self.conn.lock().await;

        if Self::get_user_sync(&conn, user_id)?.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT user_id, username, first_name, joined_at FROM users
             WHERE referrer_id = ?1 ORDER BY joined_at ASC, user_id ASC LIMIT ?2",
        )?;
        let referred_iter = stmt.query_map(params![user_id, limit], |row| {
            Ok(ReferredUser {
                user_id: row.get(0)?,
                username: row.get(1)?,
                first_name: row.get(2)?,
                joined_at: row.get(3).ok(),
            })
        })?;

        let mut referred = Vec::new();
        for user in referred_iter {
            referred.push(user?);
        }

        Ok(Some(referred))
    }

    fn get_user_sync(conn: &Connection, user_id: i64) -> Result<Option<UserRecord>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, referrer_id, username, first_name, balance, joined_at
             FROM users WHERE user_id = ?1",
        )?;
        let user_iter = stmt.query_map(params![user_id], |row| {
            Ok(UserRecord {
                user_id: row.get(0)?,
                referrer_id: row.get(1)?,
                username: row.get(2)?,
                first_name: row.get(3)?,
                balance: row.get(4)?,
                joined_at: row.get(5).ok(),
            })
        })?;

        for user in user_iter {
            return Ok(Some(user?));
        }

        Ok(None)
    }

    fn get_stats_sync(conn: &Connection, user_id: i64) -> Result<Option<ReferralStats>> {
        let Some(record) = Self::get_user_sync(conn, user_id)? else {
            return Ok(None);
        };

        let referral_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE referrer_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;

        Ok(Some(ReferralStats {
            referral_count,
            balance: record.balance,
        }))
    }
}
