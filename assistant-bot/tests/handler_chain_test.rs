//! Integration tests for [`assistant_bot::HandlerChain`].
//!
//! Covers: before/after order, before stopping the chain, Reply stopping the chain and reaching
//! after(), handler errors, and `process` delivering replies through the Bot.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assistant_bot::{
    AuthHandler, BotError, Handler, HandlerChain, HandlerError, HandlerResponse, Message, Result,
};
use async_trait::async_trait;
use common::{text_message, MockBot, Sent};

/// Pushes "before_NAME" / "handle_NAME" / "after_NAME" into a shared log.
struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    response: HandlerResponse,
}

impl Recorder {
    fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>, response: HandlerResponse) -> Self {
        Self {
            name,
            log,
            response,
        }
    }
}

#[async_trait]
impl Handler for Recorder {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        self.log.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(Recorder::new("first", log.clone(), HandlerResponse::Continue)))
        .add_handler(Arc::new(Recorder::new("second", log.clone(), HandlerResponse::Ignore)));

    let result = chain.handle(&text_message(1, "hi")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second",
            "after_first"
        ]
    );
}

/// **Test: Reply stops the handle phase; later handlers still get after().**
#[tokio::test]
async fn test_reply_stops_handle_phase() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(Recorder::new(
            "first",
            log.clone(),
            HandlerResponse::Reply("done".to_string()),
        )))
        .add_handler(Arc::new(Recorder::new("second", log.clone(), HandlerResponse::Continue)));

    let result = chain.handle(&text_message(1, "hi")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("done".to_string()));
    let log = log.lock().unwrap();
    assert!(!log.contains(&"handle_second".to_string()));
    assert!(log.contains(&"after_second".to_string()));
}

/// **Test: before returning false stops the chain with Stop; nothing is handled.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct Blocking;

    #[async_trait]
    impl Handler for Blocking {
        async fn before(&self, _message: &Message) -> Result<bool> {
            Ok(false)
        }
    }

    let handled = Arc::new(AtomicUsize::new(0));
    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for Counting {
        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Continue)
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(Blocking))
        .add_handler(Arc::new(Counting(handled.clone())));

    let result = chain.handle(&text_message(1, "hi")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handled.load(Ordering::SeqCst), 0);
}

/// **Test: AuthHandler rejects users outside the allowlist; an empty allowlist admits all.**
#[tokio::test]
async fn test_auth_handler_allowlist() {
    let restricted = HandlerChain::new().add_handler(Arc::new(AuthHandler::new(vec![999])));
    let err = restricted.handle(&text_message(1, "hi")).await.unwrap_err();
    assert!(matches!(err, BotError::Handler(HandlerError::Unauthorized)));

    let allowed = HandlerChain::new().add_handler(Arc::new(AuthHandler::new(vec![123])));
    assert!(allowed.handle(&text_message(1, "hi")).await.is_ok());

    let open = HandlerChain::new().add_handler(Arc::new(AuthHandler::new(Vec::new())));
    assert!(open.handle(&text_message(1, "hi")).await.is_ok());
}

/// **Test: process() sends Reply text as a reply to the incoming message.**
#[tokio::test]
async fn test_process_delivers_reply() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Arc::new(Recorder::new(
        "only",
        log,
        HandlerResponse::Reply("pong".to_string()),
    )));
    let bot = MockBot::new();

    chain.process(&bot, &text_message(7, "ping")).await;

    assert_eq!(
        bot.sent(),
        vec![Sent::Reply {
            chat_id: 7,
            message_id: "42".to_string(),
            text: "pong".to_string()
        }]
    );
}

/// **Test: process() swallows chain errors and sends nothing.**
#[tokio::test]
async fn test_process_logs_chain_errors() {
    let chain = HandlerChain::new().add_handler(Arc::new(AuthHandler::new(vec![999])));
    let bot = MockBot::new();

    chain.process(&bot, &text_message(7, "ping")).await;

    assert!(bot.sent().is_empty());
}
