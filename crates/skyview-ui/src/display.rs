//! The weather panel: the one display surface weather results land on.

use skyview_weather::{DisplayClass, WeatherReading};

/// A rendered weather reading.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub icon_class: DisplayClass,
    pub place_name: String,
    pub description: String,
    pub temperature: String,
}

impl WeatherCard {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            icon_class: reading.display_class(),
            place_name: reading.place_name.clone(),
            description: reading.description.clone(),
            temperature: reading.temperature_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelContent {
    #[default]
    Empty,
    Card(WeatherCard),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct WeatherPanel {
    content: PanelContent,
    visible: bool,
    fade_in: bool,
}

impl WeatherPanel {
    /// Starts hidden and empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with a card for `reading` and show the panel.
    pub fn render(&mut self, reading: &WeatherReading) {
        self.content = PanelContent::Card(WeatherCard::from_reading(reading));
        self.visible = true;
        self.fade_in = true;
    }

    /// Replace the content with the literal `message` and show the panel.
    pub fn show_error(&mut self, message: &str) {
        self.content = PanelContent::Error(message.to_string());
        self.visible = true;
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the fade-in animation class has been applied.
    pub fn is_fading_in(&self) -> bool {
        self.fade_in
    }

    /// The text a reader sees, one element per line.
    pub fn text(&self) -> Vec<String> {
        match &self.content {
            PanelContent::Empty => Vec::new(),
            PanelContent::Card(card) => vec![
                card.place_name.clone(),
                card.description.clone(),
                card.temperature.clone(),
            ],
            PanelContent::Error(message) => vec![message.clone()],
        }
    }
}

impl std::fmt::Display for WeatherPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.visible {
            return Ok(());
        }
        match &self.content {
            PanelContent::Card(card) => write!(
                f,
                "[{}] {} | {} | {}",
                card.icon_class, card.place_name, card.description, card.temperature
            ),
            _ => f.write_str(&self.text().join(" | ")),
        }
    }
}
