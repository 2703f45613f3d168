//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use crate::chain::HandlerChain;
use crate::core::{Bot as CoreBot, ToCoreMessage};
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts long polling with the given teloxide Bot. Each message is converted to core::Message
/// and processed by the chain on its own task, so the REPL is never blocked by a slow request.
#[instrument(skip(bot, handler_chain, core_bot))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Connected to Telegram");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        let core_bot = core_bot.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            tokio::spawn(async move {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "step: processing message (handler chain started)"
                );
                chain.process(core_bot.as_ref(), &core_msg).await;
            });
            Ok(())
        }
    })
    .await;

    Ok(())
}
