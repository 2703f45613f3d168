//! Bot command parsing (`/name@botname args`).

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lowercased name without the leading slash or `@botname` suffix.
    pub name: String,
    /// Remaining text after the command, trimmed.
    pub args: String,
}

/// Parses `text` as a slash command. Returns None when the text does not start with `/`
/// or the command name is empty.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;
    let (head, args) = match rest.find(char::is_whitespace) {
        Some(i) => (&rest[..i], rest[i..].trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some(Command {
        name: name.to_lowercase(),
        args: args.to_string(),
    })
}
