use teloxide::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferralBotError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] RequestError),

    #[error("Notification error: {message}")]
    Notify { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ReferralBotError>;

impl ReferralBotError {
    pub fn notify_error(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }

    /// 检查错误是否为可重试的类型
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReferralBotError::Database(_) | ReferralBotError::Telegram(_) | ReferralBotError::Io(_)
        )
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReferralBotError::Config(_) => ErrorSeverity::Critical,
            ReferralBotError::Database(_) => ErrorSeverity::High,
            ReferralBotError::Telegram(_) => ErrorSeverity::Medium,
            ReferralBotError::Notify { .. } => ErrorSeverity::Low,
            ReferralBotError::Io(_) => ErrorSeverity::Medium,
            ReferralBotError::Env(_) => ErrorSeverity::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
