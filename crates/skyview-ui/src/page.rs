//! The page controller.
//!
//! `Page` is the single owner of everything on screen: the weather panel,
//! the map view and the chrome. Background tasks never touch that state;
//! they post a [`PageMessage`] and the page applies it.

use std::sync::Arc;
use std::time::Duration;

use skyview_core::{AppError, Config};
use skyview_weather::{PlaceName, PositionSource, WeatherProvider};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::chrome::{ContactForm, NavMenu};
use crate::display::WeatherPanel;
use crate::error_mapping::PositionFailure;
use crate::map::{MapOptions, MapView};
use crate::services::{self, ChromeServiceMessage, WeatherServiceMessage};

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub map: MapOptions,
    pub acknowledgement_delay: Duration,
}

impl PageOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            map: MapOptions::from_config(&config.map),
            acknowledgement_delay: Duration::from_secs(config.page.acknowledgement_secs),
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            map: MapOptions::default(),
            acknowledgement_delay: Duration::from_secs(5),
        }
    }
}

/// A completion posted by a background task.
#[derive(Debug)]
pub enum PageMessage {
    Weather(WeatherServiceMessage),
    Chrome(ChromeServiceMessage),
}

impl From<WeatherServiceMessage> for PageMessage {
    fn from(m: WeatherServiceMessage) -> Self {
        PageMessage::Weather(m)
    }
}

impl From<ChromeServiceMessage> for PageMessage {
    fn from(m: ChromeServiceMessage) -> Self {
        PageMessage::Chrome(m)
    }
}

pub struct Page {
    provider: Arc<WeatherProvider>,
    panel: WeatherPanel,
    map: MapView,
    menu: NavMenu,
    contact: ContactForm,
    acknowledgement_delay: Duration,
    tx: UnboundedSender<PageMessage>,
    rx: UnboundedReceiver<PageMessage>,
    pending: usize,
}

impl Page {
    /// Build the page: initialise the map at its default centre and, when the
    /// host supports geolocation, start a lookup for the current position.
    pub fn load(
        options: PageOptions,
        provider: Arc<WeatherProvider>,
        position_source: PositionSource,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut page = Self {
            provider,
            panel: WeatherPanel::new(),
            map: MapView::initialize(options.map),
            menu: NavMenu::new(),
            contact: ContactForm::new(),
            acknowledgement_delay: options.acknowledgement_delay,
            tx,
            rx,
            pending: 0,
        };

        if position_source.is_available() {
            page.pending += 1;
            services::request_locate(&page.tx, page.provider.clone(), position_source);
        } else {
            tracing::debug!("Geolocation not available, staying at {}", page.map.center());
        }

        page
    }

    /// Weather form submission. Blank input does nothing and returns `false`.
    pub fn submit_weather_form(&mut self, input: &str) -> bool {
        let Some(place) = PlaceName::parse(input) else {
            return false;
        };

        tracing::debug!("Looking up weather for {}", place);
        self.pending += 1;
        services::request_weather_by_name(&self.tx, self.provider.clone(), place);
        true
    }

    /// Contact form submission: acknowledge, clear, and schedule the hide.
    pub fn submit_contact_form(&mut self) {
        self.contact.submit();
        if services::schedule_acknowledgement_hide(&self.tx, self.acknowledgement_delay) {
            self.pending += 1;
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    pub fn click_nav_link(&mut self) {
        self.menu.link_clicked();
    }

    /// Apply one completion to the page state.
    pub fn apply(&mut self, message: PageMessage) {
        self.pending = self.pending.saturating_sub(1);

        match message {
            PageMessage::Weather(WeatherServiceMessage::FetchDone { lookup, result }) => {
                match result {
                    Ok(reading) => {
                        self.panel.render(&reading);
                        self.map.recenter(reading.coordinates);
                    }
                    Err(e) => {
                        tracing::debug!(
                            "{:?} lookup failed: {}",
                            lookup,
                            AppError::from(e.clone())
                        );
                        self.panel.show_error(&e.to_string());
                    }
                }
            }
            PageMessage::Weather(WeatherServiceMessage::PositionUnavailable(e)) => {
                tracing::info!(
                    "Could not get position: {}",
                    AppError::from(PositionFailure(e))
                );
            }
            PageMessage::Chrome(ChromeServiceMessage::AcknowledgementElapsed) => {
                self.contact.hide_acknowledgement();
            }
        }
    }

    /// Wait for the next completion without applying it.
    pub async fn next_message(&mut self) -> Option<PageMessage> {
        self.rx.recv().await
    }

    /// Wait for one completion and apply it.
    pub async fn process_next(&mut self) {
        if let Some(message) = self.next_message().await {
            self.apply(message);
        }
    }

    /// Apply completions until no task is outstanding.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            self.process_next().await;
        }
    }

    /// Tasks started but not yet applied.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn panel(&self) -> &WeatherPanel {
        &self.panel
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }
}
