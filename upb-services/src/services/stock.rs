//! Stock quotes.
//!
//! The primary provider is queried with all symbols in one request. When
//! it fails or returns nothing, the CSV provider is tried instead; its rows
//! are `Symbol,Date,Time,Open,High,Low,Close,Volume`, and change is derived
//! from open and close.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::{decode, split_tokens};

const TITLE: &str = "Stock Quotes";
const NO_QUOTES: &str = "No quotes found.";

/// The primary provider rejects requests without a browser-like agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Minimum column count of a usable CSV row.
const CSV_FIELDS: usize = 8;

#[derive(Debug, Default, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse", default, deserialize_with = "lenient")]
    quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteResponse {
    #[serde(default, deserialize_with = "lenient")]
    result: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default, deserialize_with = "lenient")]
    symbol: Option<String>,
    #[serde(rename = "regularMarketPrice", default, deserialize_with = "lenient")]
    price: Option<f64>,
    #[serde(rename = "regularMarketChange", default, deserialize_with = "lenient")]
    change: Option<f64>,
    #[serde(
        rename = "regularMarketChangePercent",
        default,
        deserialize_with = "lenient"
    )]
    change_percent: Option<f64>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, symbols: &str) -> Result<Reply> {
    let symbols: Vec<String> = split_tokens(symbols)
        .into_iter()
        .map(|s| s.to_uppercase())
        .collect();
    if symbols.is_empty() {
        return Ok(Reply::new(TITLE, NO_QUOTES));
    }

    let joined = symbols
        .iter()
        .map(|s| quote_plus(s))
        .collect::<Vec<_>>()
        .join(",");
    let primary_url = format!("{}?symbols={joined}", endpoints.stock);
    let primary = http
        .get_json_with_headers(&primary_url, &[("User-Agent", BROWSER_USER_AGENT)])
        .await
        .and_then(parse_primary);

    match primary {
        Ok(lines) if !lines.is_empty() => return Ok(Reply::new(TITLE, lines.join("\n"))),
        Ok(_) => tracing::debug!("primary stock provider returned no quotes"),
        Err(err) => tracing::warn!(error = %err, "primary stock provider failed"),
    }

    let fallback_url = format!(
        "{}?s={}&f=sd2t2ohlcv&h&e=csv",
        endpoints.stock_fallback,
        fallback_symbols(&symbols)
    );
    let lines = parse_csv(&http.get_text(&fallback_url).await?);
    if lines.is_empty() {
        Ok(Reply::new(TITLE, NO_QUOTES))
    } else {
        Ok(Reply::new(TITLE, lines.join("\n")))
    }
}

/// One formatted line per quote that carries a price.
pub(crate) fn parse_primary(value: Value) -> Result<Vec<String>> {
    let envelope: QuoteEnvelope = decode(value)?;
    let results = envelope
        .quote_response
        .and_then(|r| r.result)
        .unwrap_or_default();

    Ok(results
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Quote>(item).ok())
        .filter_map(|quote| {
            let price = quote.price?;
            let symbol = quote.symbol.unwrap_or_else(|| "?".to_string());
            Some(format_quote(&symbol, price, quote.change, quote.change_percent))
        })
        .collect())
}

/// CSV provider symbols: lowercase, with a `.us` market suffix when none is given.
pub(crate) fn fallback_symbols(symbols: &[String]) -> String {
    symbols
        .iter()
        .map(|s| {
            let lower = s.to_lowercase();
            let with_market = if lower.contains('.') {
                lower
            } else {
                format!("{lower}.us")
            };
            quote_plus(&with_market)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse CSV rows, skipping the header, short rows, and rows without data.
pub(crate) fn parse_csv(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
            if fields.len() < CSV_FIELDS || fields[0].eq_ignore_ascii_case("symbol") {
                return None;
            }
            let close: f64 = fields[6].parse().ok()?;
            let open: Option<f64> = fields[3].parse().ok().filter(|o: &f64| *o != 0.0);
            let change = open.map(|o| close - o);
            let percent = open.zip(change).map(|(o, c)| c / o * 100.0);
            Some(format_quote(fields[0], close, change, percent))
        })
        .collect()
}

/// `<SYM>: <price> (<+change>, <+percent>%)`, with `n/a` for unknowns.
pub(crate) fn format_quote(
    symbol: &str,
    price: f64,
    change: Option<f64>,
    percent: Option<f64>,
) -> String {
    let change = change.map_or_else(|| "n/a".to_string(), |c| format!("{c:+.2}"));
    let percent = percent.map_or_else(|| "n/a".to_string(), |p| format!("{p:+.2}%"));
    format!("{symbol}: {price:.2} ({change}, {percent})")
}
