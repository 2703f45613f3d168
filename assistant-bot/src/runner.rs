use anyhow::Result;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, build_teloxide_bot};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, build components and the handler chain, then run
/// the REPL until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        session_scope = %config.ai().session_scope,
        max_turns = ?config.ai().max_turns,
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let components = build_bot_components(&config, teloxide_bot.clone())?;
    let handler_chain = build_handler_chain(&config, &components);

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_repl(teloxide_bot, handler_chain, components.bot.clone()).await
}
