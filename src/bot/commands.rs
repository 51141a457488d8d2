use crate::bot::dispatcher::Command;
use crate::bot::handler::ReferralHandler;
use teloxide::{types::Message, Bot, RequestError};

#[derive(Clone)]
pub struct Commands {
    handler: ReferralHandler,
}

impl Commands {
    pub fn new(handler: ReferralHandler) -> Self {
        Self { handler }
    }

    pub async fn handle_command(
        &self,
        bot: &Bot,
        message: &Message,
        command: Command,
    ) -> Result<(), RequestError> {
        match command {
            Command::Start(payload) => self.handler.handle_start(bot, message, &payload).await,
            Command::Stats => self.handler.handle_stats(bot, message).await,
            Command::Referrals => self.handler.handle_referrals(bot, message).await,
            Command::Help => self.handler.handle_help(bot, message).await,
        }
    }
}
