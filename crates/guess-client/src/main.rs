mod api;
mod app;
mod config;
mod event;
#[cfg(test)]
mod fake;
mod input;
mod poller;
mod ready;
mod ui;
mod watch;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use guess_common::setup::SetupState;

use crate::api::HttpLobbyApi;
use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SERVER_URL};

/// Guess client - music guessing game lobby in the terminal
#[derive(Parser, Debug)]
#[command(name = "guess-client", version, about)]
struct Args {
    /// Backend base URL
    #[arg(short = 's', long, env = "GUESS_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Player name to start with
    #[arg(short, long)]
    name: Option<String>,

    /// Lobby poll interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Per-request timeout in seconds (transport default when omitted)
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Print lobby updates for this player id instead of opening the TUI
    #[arg(long, value_name = "PLAYER_ID")]
    watch: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "guess_client=info,guess_common=info".into());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn initial_setup(name: Option<String>) -> SetupState {
    let Some(name) = name else {
        return SetupState::default();
    };
    match SetupState::default().begin_edit().with_draft(name).save_name() {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!("Ignoring --name: {}", e);
            SetupState::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let config = ClientConfig::new(&args.server, args.poll_interval_ms, args.request_timeout_secs)?;
    let api = Arc::new(HttpLobbyApi::new(config.clone())?);

    if let Some(player_id) = args.watch {
        return watch::run(api, &config, player_id).await;
    }

    let setup = initial_setup(args.name);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&mut terminal, api, config, setup).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["guess-client"]).unwrap();
        assert_eq!(args.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert!(args.watch.is_none());
        assert!(args.request_timeout_secs.is_none());
    }

    #[test]
    fn test_args_watch_mode() {
        let args = Args::try_parse_from([
            "guess-client",
            "-s",
            "http://lobby.test:8080",
            "--watch",
            "p7",
            "--poll-interval-ms",
            "1000",
        ])
        .unwrap();
        assert_eq!(args.server, "http://lobby.test:8080");
        assert_eq!(args.watch.as_deref(), Some("p7"));
        assert_eq!(args.poll_interval_ms, 1000);
    }

    #[test]
    fn test_initial_setup_uses_valid_name() {
        assert_eq!(initial_setup(Some("Deniz".into())).player_name(), "Deniz");
    }

    #[test]
    fn test_initial_setup_falls_back_on_invalid_name() {
        assert_eq!(initial_setup(Some("ab".into())).player_name(), "Player Name");
        assert_eq!(initial_setup(None), SetupState::default());
    }
}
