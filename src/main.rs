use std::sync::Arc;

use anyhow::{Context, Result};
use skyview_core::{AppError, Config, ConfigError};
use skyview_ui::{Page, PageOptions};
use skyview_weather::{PositionSource, ProviderSettings, WeatherProvider};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type a place name to look up its weather.
Commands: :menu  :link  :contact <message>  :help  :quit";

#[tokio::main]
async fn main() -> Result<()> {
    skyview_core::init()?;

    let (config, _warnings) = Config::load_validated()?;

    let provider = match build_provider(&config) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(anyhow::anyhow!(e));
        }
    };

    let geo = &config.page.geolocation;
    let position_source = PositionSource::from_settings(geo.enabled, geo.latitude, geo.longitude);

    let mut page = Page::load(PageOptions::from_config(&config), provider, position_source);
    tracing::info!("SkyView page loaded");

    println!("SkyView - current weather on a map");
    println!("{}", HELP);
    print_state(&page);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if !handle_line(&mut page, &line) {
                    break;
                }
            }
            Some(message) = page.next_message() => {
                page.apply(message);
                print_state(&page);
            }
        }
    }

    tracing::info!("Shutting down with {} task(s) still pending", page.pending());
    Ok(())
}

fn build_provider(config: &Config) -> Result<WeatherProvider, AppError> {
    let api_key = config
        .weather
        .effective_api_key()
        .ok_or_else(|| ConfigError::MissingSetting("weather.api_key".to_string()))?;

    let mut settings = ProviderSettings::new(config.weather.api_base_url.clone(), api_key);
    settings.units = config.weather.units.clone();
    settings.language = config.weather.language.clone();
    settings.timeout = std::time::Duration::from_secs(config.weather.request_timeout_secs);

    WeatherProvider::new(settings)
        .map_err(|e| AppError::Other(anyhow::Error::new(e).context("HTTP client")))
}

/// Returns `false` when the user asked to quit.
fn handle_line(page: &mut Page, line: &str) -> bool {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        ":quit" | ":q" => return false,
        ":help" => println!("{}", HELP),
        ":menu" => {
            page.toggle_menu();
            println!("menu {}", if page.menu().is_open() { "open" } else { "closed" });
        }
        ":link" => {
            page.click_nav_link();
            println!("menu closed");
        }
        ":contact" => {
            page.contact_mut().fields.message = rest.trim().to_string();
            page.submit_contact_form();
            println!("Thanks, your message was received.");
        }
        _ => {
            if page.submit_weather_form(line) {
                println!("Looking up {}...", line);
            }
        }
    }
    true
}

fn print_state(page: &Page) {
    if page.panel().is_visible() {
        println!("{}", page.panel());
    }
    println!("{}", page.map());
}
