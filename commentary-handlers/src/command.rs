//! Inbound text classification and the closed set of recognized commands.

/// Commands the bot understands. Only the first argument is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Allow(Option<String>),
    Remove(Option<String>),
    DumpWhitelist,
    Report,
}

/// How a non-admin caller is turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No reply at all.
    Silent,
    /// Reply with an access-denied notice.
    Notice,
}

/// What an inbound text is, before any handler acts on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// No text (media without caption, service messages).
    Empty,
    /// Anything that is not a command; goes to the commentary pipeline.
    PlainMessage,
    Command(Command),
    /// Slash text with an unrecognized name. Gets no reply.
    UnknownCommand(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::Allow(_) => "allow",
            Command::Remove(_) => "remove",
            Command::DumpWhitelist => "dump_whitelist",
            Command::Report => "report",
        }
    }

    /// `None` when any caller may run the command; otherwise how non-admins are denied.
    pub fn denial(&self) -> Option<Denial> {
        match self {
            Command::Status | Command::DumpWhitelist => Some(Denial::Silent),
            Command::Allow(_) | Command::Remove(_) => Some(Denial::Notice),
            Command::Report => None,
        }
    }

    /// Builds a command from its name (no slash, no `@bot` suffix) and first argument.
    pub fn from_parts(name: &str, arg: Option<&str>) -> Option<Self> {
        let arg = arg.map(str::to_string);
        match name {
            "status" => Some(Command::Status),
            "allow" => Some(Command::Allow(arg)),
            "remove" => Some(Command::Remove(arg)),
            "dump_whitelist" => Some(Command::DumpWhitelist),
            "report" => Some(Command::Report),
            _ => None,
        }
    }
}

/// Classifies message text. Commands have the form `/name[@bot] [args...]`; names are case-insensitive.
///
/// The name must follow the slash directly and consist of `[A-Za-z0-9_]`, as Telegram requires for
/// bot commands. Anything else (`/ status`, `/usr/bin`) is a plain message.
pub fn classify(text: &str) -> InboundEvent {
    let text = text.trim();
    if text.is_empty() {
        return InboundEvent::Empty;
    }
    let Some(rest) = text.strip_prefix('/') else {
        return InboundEvent::PlainMessage;
    };

    let (head, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let name = head.split('@').next().unwrap_or("");
    if !is_command_name(name) {
        return InboundEvent::PlainMessage;
    }
    let name = name.to_lowercase();
    match Command::from_parts(&name, args.split_whitespace().next()) {
        Some(command) => InboundEvent::Command(command),
        None => InboundEvent::UnknownCommand(name),
    }
}

fn is_command_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
