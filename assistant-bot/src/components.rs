//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use image_generation_client::{ImageGenerationClient, ImageGenerator};
use llm_client::{LlmClient, OpenAILlmClient};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};
use transcription_client::{SpeechToText, TranscriptionClient};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{
    AuthHandler, HelpHandler, ImagineHandler, LoggingHandler, PipeHandler, RestartHandler,
    StartHandler, TalkHandler, VoiceHandler, PIPE_VIDEO_FILE, RESTART_PHOTO_FILE,
};
use crate::session::{SessionFactory, SessionStore};
use crate::telegram::TelegramBotAdapter;
use crate::translator::Translator;

/// Services the handlers are built from.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn CoreBot>,
    pub sessions: Arc<SessionStore>,
    pub translator: Arc<Translator>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub speech_to_text: Arc<dyn SpeechToText>,
    pub http: reqwest::Client,
}

/// Creates the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token().to_string());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds components from the given transport and AI services. Production code goes through
/// [`build_bot_components`]; tests pass mocks.
pub fn build_components_with(
    config: &BotConfig,
    bot: Arc<dyn CoreBot>,
    llm_client: Arc<dyn LlmClient>,
    image_generator: Arc<dyn ImageGenerator>,
    speech_to_text: Arc<dyn SpeechToText>,
) -> Result<BotComponents> {
    let ai = config.ai();
    let translator = Translator::from_file(&config.base().locales_file).map_err(|e| {
        error!(
            error = %e,
            path = %config.base().locales_file.display(),
            "Failed to load locales"
        );
        anyhow::anyhow!("Failed to load locales: {}", e)
    })?;

    let sessions = SessionStore::new(
        SessionFactory {
            llm_client,
            system_prompt: ai.system_prompt.clone(),
            max_turns: ai.max_turns,
        },
        ai.session_scope()?,
    );

    Ok(BotComponents {
        bot,
        sessions: Arc::new(sessions),
        translator: Arc::new(translator),
        image_generator,
        speech_to_text,
        http: reqwest::Client::new(),
    })
}

/// Builds BotComponents against Telegram and the configured OpenAI-compatible endpoint.
#[instrument(skip(config, teloxide_bot))]
pub fn build_bot_components(config: &BotConfig, teloxide_bot: Bot) -> Result<BotComponents> {
    let ai = config.ai();
    info!(
        base_url = %ai.base_url,
        model = %ai.model,
        image_model = %ai.image_model,
        transcription_model = %ai.transcription_model,
        "Building AI clients"
    );

    let llm_client: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(ai.api_key.clone(), ai.base_url.clone())
            .with_model(ai.model.clone()),
    );
    let image_generator: Arc<dyn ImageGenerator> = Arc::new(
        ImageGenerationClient::with_base_url(ai.api_key.clone(), ai.base_url.clone())
            .with_model(ai.image_model.clone())
            .with_size(ai.image_size()?),
    );
    let speech_to_text: Arc<dyn SpeechToText> = Arc::new(
        TranscriptionClient::with_base_url(ai.api_key.clone(), ai.base_url.clone())
            .with_model(ai.transcription_model.clone()),
    );
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));

    build_components_with(config, bot, llm_client, image_generator, speech_to_text)
}

/// Builds the handler chain: logging → auth → commands → voice → talk.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let base = config.base();
    let c = components;
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(base.allowed_user_ids.clone())))
        .add_handler(Arc::new(StartHandler::new(c.translator.clone())))
        .add_handler(Arc::new(HelpHandler::new(c.translator.clone())))
        .add_handler(Arc::new(RestartHandler::new(
            c.bot.clone(),
            c.sessions.clone(),
            base.assets_dir.join(RESTART_PHOTO_FILE),
        )))
        .add_handler(Arc::new(ImagineHandler::new(
            c.bot.clone(),
            c.image_generator.clone(),
            c.http.clone(),
            base.tmp_dir.clone(),
            config.ai().retry_policy(),
        )))
        .add_handler(Arc::new(PipeHandler::new(
            c.bot.clone(),
            base.assets_dir.join(PIPE_VIDEO_FILE),
        )))
        .add_handler(Arc::new(VoiceHandler::new(
            c.bot.clone(),
            c.speech_to_text.clone(),
            c.sessions.clone(),
            base.tmp_dir.clone(),
        )))
        .add_handler(Arc::new(TalkHandler::new(c.bot.clone(), c.sessions.clone())))
}
