//! End-to-end page behaviour against a mock weather endpoint.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use skyview_ui::{Page, PageOptions, PanelContent};
use skyview_weather::{Coordinates, PositionSource, ProviderSettings, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STOCKHOLM: Coordinates = Coordinates {
    latitude: 59.3293,
    longitude: 18.0686,
};

fn provider(server: &MockServer) -> Arc<WeatherProvider> {
    Arc::new(WeatherProvider::new(ProviderSettings::new(server.uri(), "test-key")).unwrap())
}

fn weather_body(name: &str, temp: f64, icon: &str, lat: f64, lon: f64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "main": { "temp": temp },
        "weather": [ { "description": "molnigt", "icon": icon } ],
        "coord": { "lat": lat, "lon": lon }
    })
}

#[tokio::test]
async fn test_search_stockholm_renders_card_and_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Stockholm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(
            "Stockholm",
            7.0,
            "03d",
            59.3326,
            18.0649,
        )))
        .mount(&mock_server)
        .await;

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Unsupported,
    );
    assert!(page.submit_weather_form("  Stockholm  "));
    page.settle().await;

    assert_eq!(page.panel().text(), vec!["Stockholm", "molnigt", "7.0°C"]);
    match page.panel().content() {
        PanelContent::Card(card) => assert!(card.icon_class.is_available()),
        other => panic!("expected a weather card, got {:?}", other),
    }
    assert_eq!(page.map().center(), Coordinates::new(59.3326, 18.0649));
    assert_eq!(page.map().markers().len(), 1);
}

#[tokio::test]
async fn test_unknown_place_shows_location_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Nowhereville"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Unsupported,
    );
    page.submit_weather_form("Nowhereville");
    page.settle().await;

    assert!(page.panel().is_visible());
    assert_eq!(
        page.panel().content(),
        &PanelContent::Error("location not found".to_string())
    );
    assert_eq!(page.map().center(), STOCKHOLM);
    assert!(page.map().markers().is_empty());
}

#[tokio::test]
async fn test_blank_submission_sends_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Unsupported,
    );

    assert!(!page.submit_weather_form("    "));
    assert_eq!(page.pending(), 0);
    assert!(!page.panel().is_visible());
}

#[tokio::test]
async fn test_geolocation_denied_leaves_default_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Denied,
    );
    assert_eq!(page.pending(), 1);
    page.settle().await;

    assert_eq!(page.map().center(), STOCKHOLM);
    assert_eq!(page.map().zoom(), 10);
    assert!(page.map().markers().is_empty());
    assert!(!page.panel().is_visible());
}

#[tokio::test]
async fn test_geolocation_fetches_by_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "63.8258"))
        .and(query_param("lon", "20.263"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(
            "Umeå", -4.32, "13n", 63.83, 20.26,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let here = Coordinates::new(63.8258, 20.263);
    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Fixed(here),
    );
    page.settle().await;

    assert_eq!(page.panel().text(), vec!["Umeå", "molnigt", "-4.3°C"]);
    assert_eq!(page.map().center(), here);
    assert_eq!(page.map().markers().len(), 1);
}

#[tokio::test]
async fn test_geolocation_fetch_failure_is_shown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Fixed(Coordinates::new(1.0, 2.0)),
    );
    page.settle().await;

    assert_eq!(
        page.panel().text(),
        vec!["could not retrieve weather for your location"]
    );
    assert_eq!(page.map().center(), STOCKHOLM);
}

#[tokio::test]
async fn test_repeated_searches_accumulate_markers() {
    let mock_server = MockServer::start().await;

    for (name, lat, lon) in [("Lund", 55.70, 13.19), ("Kiruna", 67.85, 20.22)] {
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", name))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(weather_body(name, 1.0, "01n", lat, lon)),
            )
            .mount(&mock_server)
            .await;
    }

    let mut page = Page::load(
        PageOptions::default(),
        provider(&mock_server),
        PositionSource::Unsupported,
    );
    page.submit_weather_form("Lund");
    page.settle().await;
    page.submit_weather_form("Kiruna");
    page.settle().await;

    assert_eq!(page.map().markers().len(), 2);
    assert_eq!(page.map().center(), Coordinates::new(67.85, 20.22));
    assert_eq!(page.panel().text()[0], "Kiruna");
}

#[tokio::test(start_paused = true)]
async fn test_contact_acknowledgement_hides_after_delay() {
    // No request is made, so nothing needs to listen here.
    let offline = Arc::new(
        WeatherProvider::new(ProviderSettings::new("http://127.0.0.1:9", "key")).unwrap(),
    );
    let mut page = Page::load(
        PageOptions {
            acknowledgement_delay: Duration::from_secs(5),
            ..PageOptions::default()
        },
        offline,
        PositionSource::Unsupported,
    );

    page.contact_mut().fields.name = "Ellen".into();
    page.submit_contact_form();
    assert!(page.contact().acknowledgement_visible());
    assert!(page.contact().fields.is_blank());

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(page.pending(), 1);

    page.settle().await;
    assert!(!page.contact().acknowledgement_visible());
}
