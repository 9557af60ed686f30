use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use gopher_explore_bot::application::errors::{BotError, ConfigError};
use gopher_explore_bot::application::messaging::{MessageDispatcher, MessageParser};
use gopher_explore_bot::application::services::{CommandService, SearchService};
use gopher_explore_bot::domain::traits::Bot;
use gopher_explore_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use gopher_explore_bot::infrastructure::config::{Config, GOPHER_API_KEY_ENV, TELEGRAM_TOKEN_ENV};
use gopher_explore_bot::infrastructure::gopher::GopherClient;

/// Pause after a failed getUpdates call
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "gopher-explore-bot")]
#[command(about = "Telegram bot to explore live data from Gopher AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and environment)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Chat with the bot from the terminal
    Console,
    /// Show version
    Version,
    /// Print a default config
    InitConfig,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Console => run_console(&cli.config),
        Commands::Version => {
            println!("gopher-explore-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

/// Defaults, then the config file if present, then the environment
fn load_config(config_path: &str, token_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    config.apply_env_with(|key| std::env::var(key).ok());
    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }
    config
}

fn build_dispatcher(config: &Config) -> Result<MessageDispatcher, BotError> {
    config.validate()?;
    if config.gopher.api_key.is_none() {
        tracing::warn!("{} not set, /search will report an error", GOPHER_API_KEY_ENV);
    }

    let client = GopherClient::new(&config.gopher)?;
    tracing::info!("Using Gopher endpoint {}", client.endpoint());

    let search = SearchService::new(Arc::new(client)).with_max_results(config.gopher.max_results);
    Ok(MessageDispatcher::new(CommandService::new(&config.bot.name), search))
}

fn run_bot(config_path: &str, token_override: Option<String>) -> ExitCode {
    let config = load_config(config_path, token_override);

    let token = match config.telegram_token() {
        Ok(token) => token.to_string(),
        Err(ConfigError::MissingField(_)) => {
            eprintln!("❌ Error: {} not found in environment!", TELEGRAM_TOKEN_ENV);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = match build_dispatcher(&config) {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {}", config.bot.name);
    let bot = TelegramAdapter::new(token);
    match rt.block_on(run_telegram_bot(bot, dispatcher, config.telegram.poll_timeout_secs)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Bot stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_telegram_bot(
    mut bot: TelegramAdapter,
    dispatcher: Arc<MessageDispatcher>,
    poll_timeout_secs: u64,
) -> Result<(), BotError> {
    bot.fetch_bot_info().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    if let Err(e) = bot.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let parser = if info.username.is_empty() {
        MessageParser::new()
    } else {
        MessageParser::new().with_bot_username(info.username.clone())
    };

    let bot = Arc::new(bot);
    let mut offset: i64 = 0;

    tracing::info!("🤖 {} is running...", info.name);

    loop {
        let updates = tokio::select! {
            result = bot.get_updates(offset, poll_timeout_secs) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
        };

        match updates {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }
                for update in &updates {
                    let Some(message) = update.to_message(&parser) else {
                        continue;
                    };

                    // One task per event so a slow search never blocks other chats
                    let bot = Arc::clone(&bot);
                    let dispatcher = Arc::clone(&dispatcher);
                    tokio::spawn(async move {
                        if let Err(e) = dispatcher.dispatch(bot.as_ref(), &message).await {
                            tracing::error!("Failed to reply in chat {}: {}", message.chat_id, e);
                        }
                    });
                }

                offset = TelegramAdapter::get_next_offset(offset, &updates);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
            }
        }
    }
}

fn run_console(config_path: &str) -> ExitCode {
    let config = load_config(config_path, None);

    let dispatcher = match build_dispatcher(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting console bot (dev mode)");
    match rt.block_on(ConsoleAdapter::new().run(&dispatcher)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Console stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_config() -> ExitCode {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            println!("Secrets can stay in .env as {} and {}.", TELEGRAM_TOKEN_ENV, GOPHER_API_KEY_ENV);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
