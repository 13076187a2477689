use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::logging;
use crate::models::{Message, Role};
use crate::orchestrator::{HttpBackend, Session};
use crate::store::{ConversationStore, JsonFileStorage};
use crate::tui;
use crate::utils::{
    default_config_path, default_history_path, format_path_with_tilde, log_dir, sanitize_for_display,
};

#[derive(Parser)]
#[command(name = "prof-finder")]
#[command(version)]
#[command(about = "Ask questions about professors and browse matching reviews", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Chat history file
    #[arg(long, global = true, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Send one question and print the answer
    Ask {
        #[arg(required = true, value_name = "QUERY")]
        query: Vec<String>,
    },
    /// Print the saved conversation
    History,
    /// Delete the saved conversation
    Clear,
    /// Check that the backend is reachable
    Health,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = resolve_config(&cli)?;
    let command = cli.command.unwrap_or(Commands::Chat);

    // The UI owns the terminal, so it logs to a file; a missing data directory must not block it
    let _guard = match command {
        Commands::Chat => {
            log_dir().and_then(|dir| logging::init_file(&dir, &config.logging.level)).ok()
        }
        _ => {
            logging::init_stderr(&config.logging.level);
            None
        }
    };
    if let Some(e) = config_error {
        warn!(error = %format!("{:#}", e), "Using default configuration");
    }

    match command {
        Commands::Chat => run_chat(&config),
        Commands::Ask { query } => run_ask(&config, &query.join(" ")),
        Commands::History => show_history(&config),
        Commands::Clear => clear_history(&config),
        Commands::Health => check_health(&config),
    }
}

/// Config file plus command-line overrides.
///
/// An explicit `--config` must load. A broken default config falls back to defaults and the
/// error is handed back so it can be logged once a subscriber is installed.
fn resolve_config(cli: &Cli) -> Result<(AppConfig, Option<anyhow::Error>)> {
    let (mut config, config_error) = match &cli.config {
        Some(path) => (AppConfig::load(path)?, None),
        None => match AppConfig::load_if_present(&default_config_path()?) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    if let Some(endpoint) = &cli.endpoint {
        config.api.base_url = endpoint.clone();
    }
    if let Some(path) = &cli.history_file {
        config.storage.history_file = Some(path.clone());
    }
    Ok((config, config_error))
}

fn history_path(config: &AppConfig) -> Result<PathBuf> {
    match &config.storage.history_file {
        Some(path) => Ok(path.clone()),
        None => default_history_path(),
    }
}

fn open_session(config: &AppConfig) -> Result<Session<JsonFileStorage>> {
    let store = ConversationStore::open(JsonFileStorage::new(history_path(config)?));
    Ok(Session::new(store, config.policy()))
}

fn run_chat(config: &AppConfig) -> Result<()> {
    let session = open_session(config)?;
    let backend = HttpBackend::new(config.endpoint()).context("Failed to create HTTP client")?;
    tui::run_interactive(session, backend, config.display.theme)
}

fn run_ask(config: &AppConfig, query: &str) -> Result<()> {
    let mut session = open_session(config)?;
    let backend = HttpBackend::new(config.endpoint()).context("Failed to create HTTP client")?;

    let settled = session.submit_blocking(&backend, query)?;

    for id in &settled.appended {
        if let Some(message) = session.store().get(*id) {
            println!("{}", render_message(message));
        }
    }

    if let Some(e) = session.take_persist_error() {
        warn!(error = %e, "Answer was not saved");
        eprintln!("Warning: {}", e);
    }

    if !settled.succeeded() {
        bail!("Query failed");
    }
    Ok(())
}

fn show_history(config: &AppConfig) -> Result<()> {
    let path = history_path(config)?;
    let session = open_session(config)?;

    if session.messages().is_empty() {
        println!("No chat history at {}", format_path_with_tilde(&path));
        return Ok(());
    }

    for message in session.messages() {
        let stamp = message.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M");
        println!("[{}] {:<6} {}", stamp, message.role.as_str(), render_message(message));
    }
    Ok(())
}

fn clear_history(config: &AppConfig) -> Result<()> {
    let path = history_path(config)?;
    let mut session = open_session(config)?;

    session.clear()?;
    if let Some(e) = session.take_persist_error() {
        return Err(e).with_context(|| format!("Failed to clear {}", format_path_with_tilde(&path)));
    }

    println!("Chat history cleared: {}", format_path_with_tilde(&path));
    Ok(())
}

fn check_health(config: &AppConfig) -> Result<()> {
    let backend = HttpBackend::new(config.endpoint()).context("Failed to create HTTP client")?;
    let url = backend.endpoint().health_url();

    let health =
        backend.health().with_context(|| format!("Backend health check failed: {}", url))?;

    println!("Backend: {}", url);
    println!("Status: {}", health.status);
    if let Some(message) = health.message {
        println!("Message: {}", message);
    }
    Ok(())
}

/// Plain-text rendering of one log message
fn render_message(message: &Message) -> String {
    let text = sanitize_for_display(&message.text);
    match message.role {
        Role::Match => format!("  - {}", text.replace('\n', "\n    ")),
        _ => text,
    }
}
