//! Cryptocurrency spot prices from CoinGecko.
//!
//! Short tickers are mapped to CoinGecko coin ids through a fixed alias
//! table; anything else is passed through as an id.

use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::Reply;

use super::split_tokens;

const TITLE: &str = "Prices";
const NO_PRICES: &str = "No prices found.";

/// Ticker to CoinGecko id.
const ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("doge", "dogecoin"),
    ("ada", "cardano"),
    ("xrp", "ripple"),
    ("ltc", "litecoin"),
    ("dot", "polkadot"),
];

/// Map a ticker to its provider id, case-insensitively.
pub(crate) fn resolve(token: &str) -> String {
    let lower = token.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or(lower)
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, symbols: &str) -> Result<Reply> {
    let tokens = split_tokens(symbols);
    if tokens.is_empty() {
        return Ok(Reply::new(TITLE, NO_PRICES));
    }
    let resolved: Vec<(String, String)> = tokens
        .into_iter()
        .map(|token| {
            let id = resolve(&token);
            (token, id)
        })
        .collect();

    let ids = resolved
        .iter()
        .map(|(_, id)| quote_plus(id))
        .collect::<Vec<_>>()
        .join(",");
    let url = format!("{}?ids={ids}&vs_currencies=usd", endpoints.price);
    Ok(parse_prices(&http.get_json(&url).await?, &resolved))
}

/// One line per token with a USD price; others are omitted.
pub(crate) fn parse_prices(value: &Value, resolved: &[(String, String)]) -> Reply {
    let lines: Vec<String> = resolved
        .iter()
        .filter_map(|(token, id)| {
            let price = value.get(id)?.get("usd")?.as_f64()?;
            Some(format!("{}: ${price:.2}", token.to_uppercase()))
        })
        .collect();

    if lines.is_empty() {
        Reply::new(TITLE, NO_PRICES)
    } else {
        Reply::new(TITLE, lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(tokens: &[&str]) -> Vec<(String, String)> {
        tokens
            .iter()
            .map(|t| (t.to_string(), resolve(t)))
            .collect()
    }

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(resolve("BTC"), "bitcoin");
        assert_eq!(resolve("eth"), "ethereum");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        assert_eq!(resolve("monero"), "monero");
        assert_eq!(resolve("Chainlink"), "chainlink");
    }

    #[test]
    fn formats_found_prices_and_omits_missing() {
        let reply = parse_prices(
            &json!({"bitcoin": {"usd": 43210.5}, "ethereum": {"usd": 2300}}),
            &pairs(&["btc", "nosuchcoin", "eth"]),
        );
        assert_eq!(reply.title, "Prices");
        assert_eq!(reply.body, "BTC: $43210.50\nETH: $2300.00");
    }

    #[test]
    fn nothing_resolved_says_so() {
        let reply = parse_prices(&json!({}), &pairs(&["btc"]));
        assert_eq!(reply.body, "No prices found.");
    }

    #[test]
    fn non_numeric_price_is_omitted() {
        let reply = parse_prices(&json!({"bitcoin": {"usd": "lots"}}), &pairs(&["btc"]));
        assert_eq!(reply.body, "No prices found.");
    }
}
