//! # Assistant bot
//!
//! Telegram bot that keeps one LLM conversation per chat, generates images with `/imagine`,
//! answers voice notes through speech-to-text, and greets users in their language.
//! Loads config from env and runs the teloxide REPL.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod session;
pub mod telegram;
pub mod translator;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_command, parse_message_id, Bot, BotError, Chat, ChatAction, Command,
    Handler, HandlerError, HandlerResponse, Message, MessageKind, Result,
    ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{AiConfig, BaseConfig, BotConfig};
pub use runner::run_bot;

pub use components::{
    build_bot_components, build_components_with, build_handler_chain, build_teloxide_bot,
    BotComponents,
};
pub use handlers::{
    AuthHandler, HelpHandler, ImagineHandler, LoggingHandler, PipeHandler, RestartHandler,
    StartHandler, TalkHandler, VoiceHandler,
};
pub use session::{ConversationSession, SessionFactory, SessionScope, SessionStore};
pub use translator::{Translator, TranslatorError};
