//! Current time from WorldTimeAPI.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::decode;

#[derive(Debug, Default, Deserialize)]
struct ZoneTime {
    #[serde(default, deserialize_with = "lenient")]
    timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    datetime: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    utc_offset: Option<String>,
}

/// `<base>/ip` without a zone, `<base>/timezone/<Area/City>` with one.
pub(crate) fn time_url(endpoints: &Endpoints, zone: Option<&str>) -> String {
    match zone {
        Some(zone) => {
            let path = zone
                .split('/')
                .map(quote_plus)
                .collect::<Vec<_>>()
                .join("/");
            format!("{}/timezone/{path}", endpoints.world_time)
        }
        None => format!("{}/ip", endpoints.world_time),
    }
}

pub(crate) async fn fetch(
    http: &HttpClient,
    endpoints: &Endpoints,
    zone: Option<&str>,
) -> Result<Reply> {
    tracing::trace!(?zone, "world time");
    parse_zone_time(http.get_json(&time_url(endpoints, zone)).await?)
}

pub(crate) fn parse_zone_time(value: Value) -> Result<Reply> {
    let time: ZoneTime = decode(value)?;
    let when = time
        .datetime
        .as_deref()
        .map(trim_datetime)
        .unwrap_or_else(|| "Unknown time".to_string());
    let body = match time.utc_offset {
        Some(offset) => format!("{when} (UTC{offset})"),
        None => when,
    };
    Ok(Reply::new(
        time.timezone.unwrap_or_else(|| "World Time".to_string()),
        body,
    ))
}

/// Drop sub-second precision and the zone suffix, and turn the `T`
/// separator into a space: `2024-01-01T12:34:56.789+01:00` becomes
/// `2024-01-01 12:34:56`.
pub(crate) fn trim_datetime(iso: &str) -> String {
    let seconds = match iso.split_once('.') {
        Some((head, _)) => head,
        None => iso.get(..19).unwrap_or(iso),
    };
    seconds.replacen('T', " ", 1)
}
