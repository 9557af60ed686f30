use crate::domain::entities::{CommandKind, Reply, StaticCommand};

/// Service producing the fixed replies (start, help, info, echo, unknown)
#[derive(Debug, Clone)]
pub struct CommandService {
    bot_name: String,
    version: String,
}

impl CommandService {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn start(&self) -> Reply {
        Reply::markdown(format!(
            "👋 *Welcome to {}!*\n\n\
             Search live data from Twitter, Reddit, and TikTok using Gopher AI.\n\n\
             Try typing:\n\
             `/search AI`\n\n\
             or `/help` to see all commands.",
            self.bot_name
        ))
    }

    pub fn help(&self) -> Reply {
        let mut help = "🧠 *Available Commands:*\n\n".to_string();
        for kind in CommandKind::ALL {
            let usage = match kind {
                CommandKind::Search => "/search <keyword>".to_string(),
                other => format!("/{}", other.name()),
            };
            help.push_str(&format!("{} — {}\n", usage, kind.description()));
        }
        Reply::markdown(help.trim_end().to_string())
    }

    pub fn info(&self) -> Reply {
        Reply::markdown(format!(
            "🤖 *{}*\n\
             Version: {}\n\
             Powered by [Gopher AI](https://data.gopher-ai.com)",
            self.bot_name, self.version
        ))
    }

    /// Static reply for a command that needs no arguments
    pub fn reply_for(&self, command: StaticCommand) -> Reply {
        match command {
            StaticCommand::Start => self.start(),
            StaticCommand::Help => self.help(),
            StaticCommand::Info => self.info(),
        }
    }

    pub fn echo(&self, text: &str) -> Reply {
        Reply::markdown(format!("💬 You said:\n\n_{}_", text))
    }

    pub fn unknown_command(&self) -> Reply {
        Reply::plain("❌ Unknown command. Type /help to see available options.")
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::new("Gopher Explore Bot")
    }
}
