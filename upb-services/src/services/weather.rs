//! Current weather from Open-Meteo.
//!
//! Two stages: geocode the place name (first match only), then fetch the
//! current conditions at its coordinates. The weather code is reported as
//! a number.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::{lenient, text_or_number};
use crate::types::Reply;

use super::decode;

#[derive(Debug, Default, Deserialize)]
struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient")]
    results: Option<Vec<Value>>,
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Location {
    latitude: f64,
    longitude: f64,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    country: Option<String>,
}

impl Location {
    fn label(&self, place: &str) -> String {
        let name = self.name.as_deref().unwrap_or(place);
        match self.country.as_deref() {
            Some(country) => format!("{name}, {country}"),
            None => name.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient")]
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeather {
    #[serde(default, deserialize_with = "text_or_number")]
    temperature: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    windspeed: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    weathercode: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, place: &str) -> Result<Reply> {
    tracing::trace!(place, "weather lookup");
    let geocode_url = format!(
        "{}?name={}&count=1",
        endpoints.geocoding,
        quote_plus(place)
    );
    let Some(location) = parse_location(http.get_json(&geocode_url).await?)? else {
        return Ok(no_location(place));
    };

    let forecast_url = format!(
        "{}?latitude={}&longitude={}&current_weather=true",
        endpoints.forecast, location.latitude, location.longitude
    );
    parse_conditions(&location, place, http.get_json(&forecast_url).await?)
}

/// First geocoding match, if it carries coordinates.
pub(crate) fn parse_location(value: Value) -> Result<Option<Location>> {
    let response: GeocodeResponse = decode(value)?;
    Ok(response
        .results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| serde_json::from_value(first).ok()))
}

pub(crate) fn no_location(place: &str) -> Reply {
    Reply::new("Weather", format!("No location found for '{place}'."))
}

pub(crate) fn parse_conditions(location: &Location, place: &str, value: Value) -> Result<Reply> {
    let response: ForecastResponse = decode(value)?;
    let current = response.current_weather.unwrap_or_default();
    let or_na = |v: Option<String>| v.unwrap_or_else(|| "n/a".to_string());
    Ok(Reply::new(
        format!("Weather: {}", location.label(place)),
        format!(
            "Temperature: {}°C, Wind: {} km/h, Code: {}",
            or_na(current.temperature),
            or_na(current.windspeed),
            or_na(current.weathercode)
        ),
    ))
}
