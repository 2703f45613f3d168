//! Bot configuration: BaseConfig (Telegram, logging, paths) + AiConfig (endpoints, models, session policy).

mod ai;
mod base;
mod bot_config;


pub use ai::{AiConfig, DEFAULT_AI_BASE_URL};
pub use base::BaseConfig;
pub use bot_config::BotConfig;
