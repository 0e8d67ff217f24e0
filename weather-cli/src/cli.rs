use anyhow::{Context, anyhow, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Text};
use weather_core::{Config, ProxyClient, group_by_day};

use crate::render;

const DEFAULT_FORECAST_CITY: &str = "London";

const WEATHER_FAILED: &str = "Failed to fetch weather data. \
    Please check your connection and make sure the backend server is running.";
const FORECAST_FAILED: &str = "Failed to fetch forecast data. \
    Please check your connection and make sure the backend server is running.";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and the proxy address.
    Configure,

    /// Show current weather for a city.
    Current {
        /// City name, e.g. "London" or "New York".
        city: String,
    },

    /// Show current weather at a latitude/longitude.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Show the 5-day forecast grouped by day.
    Forecast {
        /// City name; defaults to London.
        city: Option<String>,

        /// List every 3-hour slot instead of grouping by day.
        #[arg(long)]
        hourly: bool,
    },

    /// Check that the proxy is up.
    Health,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Current { city } => {
                let city = non_blank(&city)?;
                let reading = proxy_client()?
                    .weather_by_city(city)
                    .await
                    .map_err(|e| user_facing(WEATHER_FAILED, e))?;
                print!("{}", render::reading(&reading, &Local));
            }
            Command::Coords { lat, lon } => {
                let reading = proxy_client()?
                    .weather_by_coordinates(lat, lon)
                    .await
                    .map_err(|e| user_facing(WEATHER_FAILED, e))?;
                print!("{}", render::reading(&reading, &Local));
            }
            Command::Forecast { city, hourly } => {
                let city = match city.as_deref() {
                    Some(city) => non_blank(city)?,
                    None => DEFAULT_FORECAST_CITY,
                };
                let report = proxy_client()?
                    .forecast(city)
                    .await
                    .map_err(|e| user_facing(FORECAST_FAILED, e))?;

                println!("Forecast for {}, {}", report.city, report.country);
                if hourly {
                    print!("{}", render::hourly(&report.forecast, &Local));
                } else {
                    print!("{}", render::days(&group_by_day(&report.forecast, &Local)));
                }
            }
            Command::Health => {
                let client = proxy_client()?;
                let health = client
                    .health()
                    .await
                    .with_context(|| format!("Proxy at {} is not reachable", client.base_url()))?;
                println!("{}: {}", health.status, health.message);
            }
        }

        Ok(())
    }
}

fn proxy_client() -> anyhow::Result<ProxyClient> {
    let config = Config::load()?;
    ProxyClient::new(&config.client)
}

fn non_blank(city: &str) -> anyhow::Result<&str> {
    let city = city.trim();
    if city.is_empty() {
        bail!("City name must not be empty");
    }
    Ok(city)
}

/// Log the cause and replace it with one generic message.
fn user_facing(message: &'static str, err: anyhow::Error) -> anyhow::Error {
    tracing::debug!(error = ?err, "request failed");
    anyhow!(message)
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        cfg.set_api_key(api_key.trim().to_string());
    }

    cfg.server.port = CustomType::<u16>::new("Proxy listen port:")
        .with_default(cfg.server.port)
        .prompt()
        .context("Failed to read port")?;

    cfg.client.api_base_url = Text::new("Proxy URL used by this client:")
        .with_default(&cfg.client.api_base_url)
        .prompt()
        .context("Failed to read proxy URL")?;

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    if !cfg.is_upstream_configured() {
        println!("Note: no API key set; the proxy will refuse to start without one.");
    }

    Ok(())
}
