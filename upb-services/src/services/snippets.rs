//! Single-endpoint one-liners: quotes, jokes, cat facts, and advice.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::decode;

#[derive(Debug, Default, Deserialize)]
struct QuoteEntry {
    #[serde(rename = "q", default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(rename = "a", default, deserialize_with = "lenient")]
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Joke {
    #[serde(default, deserialize_with = "lenient")]
    setup: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    punchline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CatFact {
    #[serde(default, deserialize_with = "lenient")]
    fact: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AdviceSlip {
    #[serde(default, deserialize_with = "lenient")]
    slip: Option<Slip>,
}

#[derive(Debug, Default, Deserialize)]
struct Slip {
    #[serde(default, deserialize_with = "lenient")]
    advice: Option<String>,
}

pub(crate) async fn fetch_quote(http: &HttpClient, endpoints: &Endpoints) -> Result<Reply> {
    parse_quote(http.get_json(&endpoints.quote).await?)
}

pub(crate) async fn fetch_joke(http: &HttpClient, endpoints: &Endpoints) -> Result<Reply> {
    parse_joke(http.get_json(&endpoints.joke).await?)
}

pub(crate) async fn fetch_cat_fact(http: &HttpClient, endpoints: &Endpoints) -> Result<Reply> {
    parse_cat_fact(http.get_json(&endpoints.cat_fact).await?)
}

pub(crate) async fn fetch_advice(http: &HttpClient, endpoints: &Endpoints) -> Result<Reply> {
    parse_advice(http.get_json(&endpoints.advice).await?)
}

/// The quote API answers with a one-element array; a bare object is accepted too.
pub(crate) fn parse_quote(value: Value) -> Result<Reply> {
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };
    let entry: QuoteEntry = match first {
        Some(item) => decode(item)?,
        None => QuoteEntry::default(),
    };
    let body = match entry.text {
        Some(text) => format!(
            "\"{text}\" - {}",
            entry.author.as_deref().unwrap_or("Unknown")
        ),
        None => "No quote available.".to_string(),
    };
    Ok(Reply::new("Quote", body))
}

pub(crate) fn parse_joke(value: Value) -> Result<Reply> {
    let joke: Joke = decode(value)?;
    let body = match joke.setup {
        Some(setup) => format!("{setup}\n{}", joke.punchline.unwrap_or_default()),
        None => "No joke available.".to_string(),
    };
    Ok(Reply::new("Joke", body))
}

pub(crate) fn parse_cat_fact(value: Value) -> Result<Reply> {
    let fact: CatFact = decode(value)?;
    Ok(Reply::new(
        "Cat Fact",
        fact.fact
            .unwrap_or_else(|| "No cat fact available.".to_string()),
    ))
}

pub(crate) fn parse_advice(value: Value) -> Result<Reply> {
    let slip: AdviceSlip = decode(value)?;
    Ok(Reply::new(
        "Advice",
        slip.slip
            .and_then(|s| s.advice)
            .unwrap_or_else(|| "No advice available.".to_string()),
    ))
}
