//! Weather backend: async weather lookups.
//! Network work runs as tokio tasks; results are posted back to the page over mpsc.

use std::sync::Arc;

use skyview_weather::{
    Coordinates, FetchError, LocationError, LookupKind, PlaceName, PositionSource,
    WeatherProvider, WeatherReading,
};
use tokio::sync::mpsc::UnboundedSender;

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("weather service not initialized")]
    NotInitialized,
}

/// Messages sent from async operations back to the page
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of a weather lookup
    FetchDone {
        lookup: LookupKind,
        result: Result<WeatherReading, WeatherError>,
    },
    /// The host could not or would not report a position
    PositionUnavailable(LocationError),
}

fn post<M>(tx: &UnboundedSender<M>, message: WeatherServiceMessage)
where
    M: From<WeatherServiceMessage>,
{
    let _ = tx.send(M::from(message));
}

fn runtime_or_report<M>(
    tx: &UnboundedSender<M>,
    lookup: LookupKind,
) -> Option<tokio::runtime::Handle>
where
    M: From<WeatherServiceMessage>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::error!("No tokio runtime for weather lookup: {}", e);
            post(
                tx,
                WeatherServiceMessage::FetchDone {
                    lookup,
                    result: Err(WeatherError::NotInitialized),
                },
            );
            None
        }
    }
}

/// Look up weather for a place name.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch_by_name<M>(
    tx: &UnboundedSender<M>,
    provider: Arc<WeatherProvider>,
    place: PlaceName,
) where
    M: From<WeatherServiceMessage> + Send + 'static,
{
    let Some(runtime) = runtime_or_report(tx, LookupKind::Name) else {
        return;
    };
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = provider
            .fetch_by_name(&place)
            .await
            .map_err(WeatherError::from);
        post(
            &tx,
            WeatherServiceMessage::FetchDone {
                lookup: LookupKind::Name,
                result,
            },
        );
    });
}

/// Look up weather at a coordinate pair.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch_by_coordinates<M>(
    tx: &UnboundedSender<M>,
    provider: Arc<WeatherProvider>,
    coordinates: Coordinates,
) where
    M: From<WeatherServiceMessage> + Send + 'static,
{
    let Some(runtime) = runtime_or_report(tx, LookupKind::Coordinates) else {
        return;
    };
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = provider
            .fetch_by_coordinates(coordinates)
            .await
            .map_err(WeatherError::from);
        post(
            &tx,
            WeatherServiceMessage::FetchDone {
                lookup: LookupKind::Coordinates,
                result,
            },
        );
    });
}

/// Ask the host for its position, then look up weather there.
/// Sends `PositionUnavailable` if no position is reported, otherwise `FetchDone`.
pub fn request_locate<M>(
    tx: &UnboundedSender<M>,
    provider: Arc<WeatherProvider>,
    source: PositionSource,
) where
    M: From<WeatherServiceMessage> + Send + 'static,
{
    let Some(runtime) = runtime_or_report(tx, LookupKind::Coordinates) else {
        return;
    };
    let tx = tx.clone();

    runtime.spawn(async move {
        let coordinates = match source.current_position().await {
            Ok(c) => {
                tracing::info!("Got location: {}", c);
                c
            }
            Err(e) => {
                post(&tx, WeatherServiceMessage::PositionUnavailable(e));
                return;
            }
        };

        let result = provider
            .fetch_by_coordinates(coordinates)
            .await
            .map_err(WeatherError::from);
        post(
            &tx,
            WeatherServiceMessage::FetchDone {
                lookup: LookupKind::Coordinates,
                result,
            },
        );
    });
}
