//! Public IP echo.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::decode;

#[derive(Debug, Default, Deserialize)]
struct Echo {
    #[serde(default, deserialize_with = "lenient")]
    ip: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints) -> Result<Reply> {
    let url = format!("{}?format=json", endpoints.ip);
    parse_echo(http.get_json(&url).await?)
}

pub(crate) fn parse_echo(value: Value) -> Result<Reply> {
    let echo: Echo = decode(value)?;
    Ok(Reply::new(
        "Public IP",
        echo.ip.unwrap_or_else(|| "Unknown".to_string()),
    ))
}
