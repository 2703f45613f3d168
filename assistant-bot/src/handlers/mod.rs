//! Handler implementations: logging and auth, the slash commands, voice notes and plain talk.
//!
//! Every command handler returns `Continue` for messages it does not own, so the order in the
//! chain only matters for the fallback [`TalkHandler`], which must come last.

mod greeting;
mod imagine;
mod logging_auth;
mod media;
mod talk;
mod voice;

pub use greeting::{HelpHandler, StartHandler, DEFAULT_LANGUAGE};
pub use imagine::ImagineHandler;
pub use logging_auth::{AuthHandler, LoggingHandler};
pub use media::{PipeHandler, RestartHandler, PIPE_VIDEO_FILE, RESTART_PHOTO_FILE};
pub use talk::TalkHandler;
pub use voice::VoiceHandler;

use std::path::Path;

use tracing::warn;

use crate::core::{parse_command, Command, Message, MessageKind};

/// Parses the message as a slash command when it is a text message.
fn command_of(message: &Message) -> Option<Command> {
    match message.kind {
        MessageKind::Text => parse_command(&message.content),
        _ => None,
    }
}

/// Deletes a per-message temp file once its contents have been sent or read.
async fn remove_temp_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(error = %e, path = %path.display(), "Failed to remove temp file"),
    }
}
