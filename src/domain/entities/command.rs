/// Commands answered with a fixed reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticCommand {
    Start,
    Help,
    Info,
}

/// The closed set of commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Static(StaticCommand),
    Search,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Static(StaticCommand::Start),
        CommandKind::Static(StaticCommand::Help),
        CommandKind::Static(StaticCommand::Info),
        CommandKind::Search,
    ];

    /// Resolve a command token, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Static(StaticCommand::Start) => "start",
            CommandKind::Static(StaticCommand::Help) => "help",
            CommandKind::Static(StaticCommand::Info) => "info",
            CommandKind::Search => "search",
        }
    }

    /// Short description shown in the Telegram command menu
    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Static(StaticCommand::Start) => "Start the bot",
            CommandKind::Static(StaticCommand::Help) => "Show this help menu",
            CommandKind::Static(StaticCommand::Info) => "Show bot information",
            CommandKind::Search => "Search Gopher data by keyword",
        }
    }
}
