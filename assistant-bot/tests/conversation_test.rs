//! Integration tests for [`assistant_bot::ConversationSession`].
//!
//! Covers: transcript growth per exchange, reset, rollback on upstream failure, the turn window,
//! and a full round trip through [`llm_client::OpenAILlmClient`] against a mockito server.

mod common;

use std::sync::Arc;

use assistant_bot::{BotError, ConversationSession};
use common::ScriptedLlm;
use llm_client::OpenAILlmClient;
use mockito::Matcher;
use prompt::{ChatMessage, MessageRole, DEFAULT_SYSTEM_MESSAGE};

fn session_with(llm: Arc<ScriptedLlm>) -> ConversationSession {
    ConversationSession::new(llm, DEFAULT_SYSTEM_MESSAGE)
}

/// **Test: Every successful send adds exactly two turns; the system turn stays first.**
///
/// **Setup:** Session over a scripted LLM.
/// **Action:** Five sends.
/// **Expected:** Length is 1 + 2n after send n; element 0 is the system turn throughout.
#[tokio::test]
async fn test_transcript_grows_by_two_per_send() {
    let mut session = session_with(Arc::new(ScriptedLlm::new()));
    assert_eq!(session.len(), 1);

    for n in 1..=5 {
        let reply = session.send(&format!("question {}", n)).await.unwrap();
        assert_eq!(reply, format!("reply to: question {}", n));
        assert_eq!(session.len(), 1 + 2 * n);
        assert_eq!(
            session.transcript()[0],
            ChatMessage::system(DEFAULT_SYSTEM_MESSAGE)
        );
    }

    let roles: Vec<MessageRole> = session.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles[1], MessageRole::User);
    assert_eq!(roles[2], MessageRole::Assistant);
}

/// **Test: The whole transcript is replayed on each request.**
///
/// **Setup:** Session over a recording LLM.
/// **Action:** Two sends.
/// **Expected:** Second request carries system, first exchange, and the new user turn.
#[tokio::test]
async fn test_send_replays_full_transcript() {
    let llm = Arc::new(ScriptedLlm::new());
    let mut session = session_with(llm.clone());

    session.send("first").await.unwrap();
    session.send("second").await.unwrap();

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].len(), 2);
    assert_eq!(
        requests[1],
        vec![
            ChatMessage::system(DEFAULT_SYSTEM_MESSAGE),
            ChatMessage::user("first"),
            ChatMessage::assistant("reply to: first"),
            ChatMessage::user("second"),
        ]
    );
}

/// **Test: reset() restores length 1 regardless of prior length.**
#[tokio::test]
async fn test_reset_restores_system_turn_only() {
    let mut session = session_with(Arc::new(ScriptedLlm::new()));
    session.reset();
    assert_eq!(session.len(), 1);

    for i in 0..4 {
        session.send(&format!("m{}", i)).await.unwrap();
    }
    assert_eq!(session.len(), 9);

    session.reset();
    assert_eq!(session.len(), 1);
    assert!(session.transcript()[0].is_system());
    assert!(session.is_empty());
}

/// **Test: A failed request surfaces Upstream and leaves the transcript unchanged.**
///
/// **Setup:** LLM that fails for "boom".
/// **Action:** send("ok"), send("boom"), send("ok again").
/// **Expected:** Upstream error for "boom"; transcript holds only the two complete exchanges.
#[tokio::test]
async fn test_failed_send_rolls_back_user_turn() {
    let mut session = session_with(Arc::new(ScriptedLlm::failing_on(&["boom"])));

    session.send("ok").await.unwrap();
    let err = session.send("boom").await.unwrap_err();
    assert!(matches!(err, BotError::Upstream(ref m) if m.contains("upstream unavailable")));
    assert_eq!(session.len(), 3);

    session.send("ok again").await.unwrap();
    assert_eq!(session.len(), 5);
    assert!(session
        .transcript()
        .iter()
        .all(|m| m.content != "boom"));
}

/// **Test: With max_turns set, only the newest non-system turns are kept.**
#[tokio::test]
async fn test_window_keeps_newest_turns() {
    let mut session =
        session_with(Arc::new(ScriptedLlm::new())).with_max_turns(Some(4));

    for i in 0..5 {
        session.send(&format!("m{}", i)).await.unwrap();
    }

    let contents: Vec<&str> = session
        .transcript()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(
        contents,
        vec![
            DEFAULT_SYSTEM_MESSAGE,
            "m3",
            "reply to: m3",
            "m4",
            "reply to: m4"
        ]
    );
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1706529600,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13}
    })
    .to_string()
}

/// **Test: send("hi") against a mocked endpoint answering "hello".**
///
/// **Setup:** mockito `/chat/completions` returning "hello"; OpenAILlmClient pointed at it.
/// **Action:** send("hi").
/// **Expected:** Returns "hello"; transcript ends with {user,"hi"}, {assistant,"hello"}.
#[tokio::test]
async fn test_send_hi_against_mock_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(serde_json::json!({"model": "gpt-3.5-turbo", "n": 1})),
            Matcher::Regex(r#""content":"hi""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("hello"))
        .create_async()
        .await;

    let llm = OpenAILlmClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let mut session = ConversationSession::new(Arc::new(llm), DEFAULT_SYSTEM_MESSAGE);

    let reply = session.send("hi").await.unwrap();

    assert_eq!(reply, "hello");
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1], ChatMessage::user("hi"));
    assert_eq!(transcript[2], ChatMessage::assistant("hello"));
    mock.assert_async().await;
}

/// **Test: A response without choices is an Upstream error.**
#[tokio::test]
async fn test_send_without_choices_is_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "id": "chatcmpl-empty",
                "object": "chat.completion",
                "created": 1706529600,
                "model": "gpt-3.5-turbo",
                "choices": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let llm = OpenAILlmClient::with_base_url("sk-test-key-123456".to_string(), server.url());
    let mut session = ConversationSession::new(Arc::new(llm), DEFAULT_SYSTEM_MESSAGE);

    let err = session.send("hi").await.unwrap_err();

    assert!(matches!(err, BotError::Upstream(_)));
    assert_eq!(session.len(), 1);
}
