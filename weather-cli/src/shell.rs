//! Interactive menu loop: MainMenu -> AwaitingCityInput -> MainMenu ... -> Exit.

use std::io::Write;

use anyhow::Result;
use tracing::{info, warn};
use weather_core::{
    CityQuery, HistoryEntry, HistoryLog, HistoryStore, WeatherError, WeatherProvider,
    config::API_KEY_ENV,
    history::DEFAULT_RECENT,
    render,
};

use crate::prompt::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MainMenu,
    AwaitingCityInput,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Lookup,
    History,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Lookup),
            "2" => Some(Self::History),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Shell<P, R, W> {
    provider: P,
    store: HistoryStore,
    log: HistoryLog,
    prompt: R,
    out: W,
}

impl<P, R, W> Shell<P, R, W>
where
    P: WeatherProvider,
    R: Prompt,
    W: Write,
{
    pub fn new(provider: P, store: HistoryStore, log: HistoryLog, prompt: R, out: W) -> Self {
        Self {
            provider,
            store,
            log,
            prompt,
            out,
        }
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Run until the user exits or input ends.
    ///
    /// Lookup and history failures are reported and the loop continues; only
    /// console I/O errors end the session early.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = State::MainMenu;

        loop {
            state = match state {
                State::MainMenu => self.main_menu()?,
                State::AwaitingCityInput => self.lookup().await?,
                State::Exit => break,
            };
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<State> {
        writeln!(self.out, "\n=== Weather CLI ===")?;
        writeln!(self.out, "1) Current weather by city")?;
        writeln!(self.out, "2) View last {DEFAULT_RECENT} searches")?;
        writeln!(self.out, "0) Exit")?;

        let Some(input) = self.prompt.ask("Choose:")? else {
            return Ok(State::Exit);
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::Lookup) => Ok(State::AwaitingCityInput),
            Some(MenuChoice::History) => {
                self.show_history()?;
                Ok(State::MainMenu)
            }
            Some(MenuChoice::Exit) => Ok(State::Exit),
            None => {
                writeln!(self.out, "Invalid option.")?;
                Ok(State::MainMenu)
            }
        }
    }

    async fn lookup(&mut self) -> Result<State> {
        let Some(input) = self.prompt.ask("Enter city (e.g., London):")? else {
            return Ok(State::Exit);
        };

        let city = match CityQuery::try_from(input.as_str()) {
            Ok(city) => city,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(State::AwaitingCityInput);
            }
        };

        match self.provider.fetch(&city).await {
            Ok(reading) => {
                writeln!(self.out, "{}", render::render(&reading))?;

                let entry = HistoryEntry::now(city.as_str(), &render::summarize(&reading));
                if let Err(e) = self.store.append(&mut self.log, entry) {
                    warn!(error = %e, "Could not save search history");
                    writeln!(self.out, "Warning: search not saved to history: {e}")?;
                } else {
                    info!(%city, "Lookup recorded");
                }
            }
            Err(e) => {
                warn!(error = %e, %city, "Weather lookup failed");
                writeln!(self.out, "❌ Error: {}", describe(&e))?;
            }
        }

        Ok(State::MainMenu)
    }

    fn show_history(&mut self) -> Result<()> {
        let recent = self.log.recent(DEFAULT_RECENT);

        if recent.is_empty() {
            writeln!(self.out, "\n(No history yet.)")?;
            return Ok(());
        }

        writeln!(self.out, "\n🕘 Last searches:")?;
        for entry in recent {
            writeln!(self.out, " - {}: {} — {}", entry.time, entry.city, entry.summary)?;
        }

        Ok(())
    }
}

fn describe(err: &WeatherError) -> String {
    match err {
        WeatherError::Auth => format!("{err} Check the {API_KEY_ENV} environment variable."),
        WeatherError::Timeout { .. } | WeatherError::Network(_) => {
            format!("{err} Check your connection and try again.")
        }
        WeatherError::NotFound | WeatherError::Upstream { .. } | WeatherError::Parse(_) => {
            err.to_string()
        }
    }
}
