//! One-shot device position lookup.
//!
//! A desktop machine has no browser geolocation API, so the position comes
//! from a single request to an IP-geolocation endpoint. The lookup carries a
//! fixed 10-second timeout and maps every failure onto one of four reason
//! codes (permission denied, position unavailable, timeout, other), each with
//! its own fixed user-facing message.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// IP geolocation endpoint (no key required)
const GEOLOCATE_ENDPOINT: &str = "http://ip-api.com/json";

/// Fixed deadline for the whole lookup
const GEOLOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved device position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Why the position lookup failed
#[derive(Debug, Error)]
pub enum GeolocateError {
    #[error("geolocation service refused the request")]
    PermissionDenied,
    #[error("could not resolve a position: {0}")]
    PositionUnavailable(String),
    #[error("geolocation request timed out")]
    Timeout,
    #[error("geolocation service returned status {0}")]
    Service(reqwest::StatusCode),
    #[error("failed to reach geolocation service")]
    Transport(#[from] reqwest::Error),
}

impl GeolocateError {
    /// Fixed message shown to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Please allow location access to find nearby ice cream shops."
            }
            Self::PositionUnavailable(_) => "Your location information is unavailable.",
            Self::Timeout => "The request to get your location timed out.",
            Self::Service(_) | Self::Transport(_) => "Could not get your location.",
        }
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Request the current position once, with the fixed timeout.
pub async fn current_position(client: &reqwest::Client) -> Result<Coordinates, GeolocateError> {
    match tokio::time::timeout(GEOLOCATE_TIMEOUT, lookup(client)).await {
        Ok(result) => result,
        Err(_) => Err(GeolocateError::Timeout),
    }
}

async fn lookup(client: &reqwest::Client) -> Result<Coordinates, GeolocateError> {
    let response = client
        .get(GEOLOCATE_ENDPOINT)
        .query(&[("fields", "status,message,lat,lon")])
        .send()
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        return Err(GeolocateError::PermissionDenied);
    }
    if !status.is_success() {
        return Err(GeolocateError::Service(status));
    }

    let body: LookupResponse = response.json().await?;
    if body.status != "success" {
        let reason = body.message.unwrap_or_else(|| "unknown".to_string());
        return Err(GeolocateError::PositionUnavailable(reason));
    }

    match (body.lat, body.lon) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(GeolocateError::PositionUnavailable(
            "response carried no coordinates".to_string(),
        )),
    }
}
