pub mod commands;
pub mod dispatcher;
pub mod handler;
pub mod keyboards;
pub mod notifier;
pub mod traits;

pub use commands::Commands;
pub use dispatcher::{start_bot, BotDispatcher, Command};
pub use handler::ReferralHandler;
pub use notifier::{Notifier, NotifyStatus};
pub use traits::BotApi;
