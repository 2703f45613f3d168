//! Test doubles shared by the integration tests: a recording [`Bot`], scripted AI services and
//! a message builder.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use image_generation_client::{ImageGenerationError, ImageGenerator};
use llm_client::LlmClient;
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use transcription_client::SpeechToText;

use assistant_bot::{Bot, Chat, ChatAction, Message, MessageKind, Result, User};

/// One recorded call on [`MockBot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Reply { chat_id: i64, message_id: String, text: String },
    Action { chat_id: i64, action: ChatAction },
    Photo { chat_id: i64, path: PathBuf },
    Video { chat_id: i64, path: PathBuf },
    Download { file_id: String, dest: PathBuf },
}

/// Bot that records every call. `download_file` writes the file id to `dest` as the file's
/// contents; `send_photo` keeps the bytes it was given, since handlers delete temp files.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    photos: Mutex<Vec<Vec<u8>>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of all replies, in order.
    pub fn replies(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reply { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Contents of every sent photo, read when it was sent.
    pub fn photo_bytes(&self) -> Vec<Vec<u8>> {
        self.photos.lock().unwrap().clone()
    }

    fn record(&self, s: Sent) {
        self.sent.lock().unwrap().push(s);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(Sent::Reply {
            chat_id: message.chat.id,
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()> {
        self.record(Sent::Action {
            chat_id: chat.id,
            action,
        });
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.photos.lock().unwrap().push(std::fs::read(path)?);
        self.record(Sent::Photo {
            chat_id: chat.id,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.record(Sent::Video {
            chat_id: chat.id,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, file_id)?;
        self.record(Sent::Download {
            file_id: file_id.to_string(),
            dest: dest.to_path_buf(),
        });
        Ok(())
    }
}

/// LLM that answers `"reply to: <last user turn>"`, or fails for user text in `fail_on`.
/// Records every request.
#[derive(Default)]
pub struct ScriptedLlm {
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    fail_on: Vec<String>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: texts.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let last = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.requests.lock().unwrap().push(messages);
        if self.fail_on.contains(&last) {
            anyhow::bail!("upstream unavailable");
        }
        Ok(format!("reply to: {}", last))
    }
}

/// Image generator returning queued results in order; the last one repeats.
pub struct QueuedImageGenerator {
    results: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: AtomicUsize,
}

impl QueuedImageGenerator {
    pub fn returning_url(url: impl Into<String>) -> Self {
        Self::new(vec![Ok(url.into())])
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(vec![Err(message.into())])
    }

    pub fn new(results: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for QueuedImageGenerator {
    async fn generate_image(&self, _prompt: &str) -> image_generation_client::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut results = self.results.lock().unwrap();
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().cloned()
        };
        match next {
            Some(Ok(url)) => Ok(url),
            Some(Err(m)) => Err(ImageGenerationError::Upstream(m)),
            None => Err(ImageGenerationError::Upstream("no result queued".to_string())),
        }
    }
}

enum Transcription {
    Fixed(String),
    Failing,
    /// Waits a little, then returns the audio file's contents.
    FileContents,
}

/// Speech-to-text returning a fixed transcription, failing, or echoing the audio file.
pub struct FixedTranscriber {
    mode: Transcription,
    calls: AtomicUsize,
}

impl FixedTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_mode(Transcription::Fixed(text.into()))
    }

    pub fn failing() -> Self {
        Self::with_mode(Transcription::Failing)
    }

    /// Transcribes a file as its own contents after a short delay, so overlapping requests
    /// are still in flight together when they read their audio.
    pub fn echoing_file() -> Self {
        Self::with_mode(Transcription::FileContents)
    }

    fn with_mode(mode: Transcription) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechToText for FixedTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !audio_path.exists() {
            anyhow::bail!("audio file missing: {}", audio_path.display());
        }
        match &self.mode {
            Transcription::Fixed(text) => Ok(text.clone()),
            Transcription::Failing => anyhow::bail!("transcription endpoint unavailable"),
            Transcription::FileContents => {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                Ok(tokio::fs::read_to_string(audio_path).await?)
            }
        }
    }
}

pub fn test_user(id: i64) -> User {
    User {
        id,
        username: Some("test_user".to_string()),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        language_code: Some("en".to_string()),
    }
}

/// Text message from user 123 in the given chat.
pub fn text_message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "42".to_string(),
        user: test_user(123),
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        kind: MessageKind::Text,
        created_at: Utc::now(),
    }
}

/// Voice note from user 123 in the given chat.
pub fn voice_message(chat_id: i64, file_id: &str) -> Message {
    Message {
        content: String::new(),
        kind: MessageKind::Voice {
            file_id: file_id.to_string(),
        },
        ..text_message(chat_id, "")
    }
}

pub const LOCALES_JSON: &str = r#"{
  "en": {"messages": {"start": "Hello, I'm an AI assistant", "help": "Just write to me."}},
  "pt-br": {"messages": {"start": "Olá, sou um assistente", "help": "É só me escrever."}}
}"#;
