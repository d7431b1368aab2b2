use std::{
    io::{self, IsTerminal, Write},
    process::ExitCode,
};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{debug, warn};
use weather_core::{
    Config, ConfigError, HistoryLog, HistoryStore, OpenWeatherProvider, Settings,
    config::API_KEY_ENV,
};

use crate::{
    prompt::{InquirePrompt, LinePrompt, Prompt},
    shell::Shell,
};

/// Exit status when the API key is not configured.
const EXIT_MISSING_KEY: u8 = 2;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather by city (OpenWeather), with a local search history"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let settings = load_settings();
        let env = |name: &str| std::env::var(name).ok();

        let end = if io::stdin().is_terminal() {
            session(env, settings, InquirePrompt, io::stdout()).await?
        } else {
            let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
            session(env, settings, prompt, io::stdout()).await?
        };

        Ok(ExitCode::from(end.exit_code()))
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user exited or input ended.
    Finished,
    /// No API key; the menu was never shown.
    MissingApiKey,
}

impl SessionEnd {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Finished => 0,
            Self::MissingApiKey => EXIT_MISSING_KEY,
        }
    }
}

/// Resolve the API key through `lookup`, load history, then run the menu loop.
pub async fn session<F, R, W>(
    lookup: F,
    settings: Settings,
    prompt: R,
    mut out: W,
) -> anyhow::Result<SessionEnd>
where
    F: Fn(&str) -> Option<String>,
    R: Prompt,
    W: Write,
{
    writeln!(out, "Welcome to Weather CLI (OpenWeather)")?;

    let config = match Config::from_lookup(lookup, settings) {
        Ok(config) => config,
        Err(ConfigError::MissingApiKey) => {
            write_api_key_help(&mut out)?;
            return Ok(SessionEnd::MissingApiKey);
        }
        Err(e) => return Err(e.into()),
    };
    debug!(?config, "Configuration resolved");

    let provider =
        OpenWeatherProvider::from_config(&config).context("Failed to create HTTP client")?;
    let store = HistoryStore::new(config.settings.history_file.clone());
    let log = load_history(&store, &mut out)?;

    let mut shell = Shell::new(provider, store, log, prompt, out);
    shell.run().await?;
    debug!(entries = shell.log().len(), "Session ended");

    Ok(SessionEnd::Finished)
}

/// A broken settings file must not keep the tool from starting.
fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Ignoring settings file");
            eprintln!("Warning: {e}. Using default settings.");
            Settings::default()
        }
    }
}

fn load_history<W: Write>(store: &HistoryStore, out: &mut W) -> io::Result<HistoryLog> {
    match store.load() {
        Ok(log) => Ok(log),
        Err(e) => {
            warn!(error = %e, "Starting with empty history");
            writeln!(out, "Warning: {e}. Starting with an empty history.")?;
            Ok(HistoryLog::default())
        }
    }
}

fn write_api_key_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "⚠️  {API_KEY_ENV} environment variable is not set.")?;
    writeln!(out, "    Get a free API key at https://openweathermap.org/ and set it like:")?;
    writeln!(out, "    Windows (PowerShell):   setx {API_KEY_ENV} your_key_here")?;
    writeln!(out, "    macOS/Linux (bash/zsh): export {API_KEY_ENV}=your_key_here")
}
