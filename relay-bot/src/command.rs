//! Routing of inbound text to bot commands or a text operation.

/// What an inbound text asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// `/image` with its description, `None` when the description is missing.
    Image(Option<String>),
    /// Free text for the text operation.
    Text(String),
    /// Unknown command, a command for another bot, or nothing to do.
    Ignore,
}

/// Parses `text`. `/cmd@name` is only honored when `name` matches `bot_username`
/// (case-insensitive); with no known username it is accepted.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Command {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Command::Ignore;
    }

    let Some(body) = trimmed.strip_prefix('/') else {
        return Command::Text(text.to_string());
    };

    let (head, rest) = match body.find(char::is_whitespace) {
        Some(pos) => (&body[..pos], body[pos..].trim()),
        None => (body, ""),
    };
    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };

    if let (Some(target), Some(username)) = (target, bot_username) {
        if !target.eq_ignore_ascii_case(username) {
            return Command::Ignore;
        }
    }

    match name.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "help" => Command::Help,
        "image" => Command::Image(Some(rest.to_string()).filter(|r| !r.is_empty())),
        _ => Command::Ignore,
    }
}
