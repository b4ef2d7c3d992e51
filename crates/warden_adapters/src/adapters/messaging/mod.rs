//! Messaging platform adapters.

mod discord;
mod slack;
mod telegram;
mod twilio;

pub use discord::DiscordAdapter;
pub use slack::SlackAdapter;
pub use telegram::TelegramAdapter;
pub use twilio::TwilioAdapter;
