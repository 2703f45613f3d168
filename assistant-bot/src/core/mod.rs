//! Core types and traits: Handler, Bot, Message, HandlerResponse, command parsing, error, logger.
//! Transport-agnostic; the telegram module adapts teloxide to these.

pub mod bot;
pub mod command;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, ChatAction};
pub use command::{parse_command, Command};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageKind, ToCoreMessage,
    ToCoreUser, User,
};
