//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; the handler already delivered its output (photo, video).
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain; the chain sends the text as a reply to the incoming message.
    Reply(String),
}
