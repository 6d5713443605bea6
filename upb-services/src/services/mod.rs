//! Service adapters.
//!
//! Each module wraps one upstream API: it builds the request URL, calls the
//! shared [`HttpClient`], and extracts a [`Reply`] from the response with a
//! fixed fallback for every optional field. Payload extraction lives in
//! plain `parse_*` functions so it can be tested on fixtures.
//!
//! [`Services`] is the public face of the adapters. Its methods never fail:
//! every error is logged and rendered into an error [`Reply`].

pub mod dictionary;
pub mod duckduckgo;
pub mod hackernews;
pub mod ip;
pub mod price;
pub mod snippets;
pub mod stock;
pub mod weather;
pub mod wikipedia;
pub mod worldtime;
pub mod xkcd;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::http::HttpClient;
use crate::types::{Reply, Service};

/// Decode a JSON payload into an adapter's response shape.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ServiceError::Parse(format!("unexpected response shape: {e}")))
}

/// Split a free-text symbol list on whitespace and commas.
pub(crate) fn split_tokens(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert an adapter outcome into a printable reply.
fn settle(service: Service, outcome: Result<Reply>) -> Reply {
    match outcome {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(%service, error = %err, "service fetch failed");
            Reply::error(service, &err)
        }
    }
}

/// Entry point for every service adapter.
#[derive(Debug, Clone)]
pub struct Services {
    http: HttpClient,
    config: ServiceConfig,
}

impl Services {
    /// Validate `config` and build the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] for an invalid configuration, or
    /// [`ServiceError::Http`] if the client cannot be constructed.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Encyclopedia summary for an article title.
    pub async fn wikipedia(&self, term: &str) -> Reply {
        settle(
            Service::Wikipedia,
            wikipedia::fetch(&self.http, &self.config.endpoints, term).await,
        )
    }

    /// Instant answer for a free-text query.
    pub async fn duckduckgo(&self, query: &str) -> Reply {
        settle(
            Service::DuckDuckGo,
            duckduckgo::fetch(&self.http, &self.config.endpoints, query).await,
        )
    }

    /// Comic metadata for `number`, or the latest comic when `None`.
    pub async fn xkcd(&self, number: Option<u32>) -> Reply {
        settle(
            Service::Xkcd,
            xkcd::fetch(&self.http, &self.config.endpoints, number).await,
        )
    }

    /// Top stories, `hn_story_count` of them.
    pub async fn hacker_news(&self) -> Reply {
        settle(
            Service::HackerNews,
            hackernews::fetch(
                &self.http,
                &self.config.endpoints,
                self.config.hn_story_count,
            )
            .await,
        )
    }

    pub async fn quote(&self) -> Reply {
        settle(
            Service::Quote,
            snippets::fetch_quote(&self.http, &self.config.endpoints).await,
        )
    }

    pub async fn joke(&self) -> Reply {
        settle(
            Service::Joke,
            snippets::fetch_joke(&self.http, &self.config.endpoints).await,
        )
    }

    pub async fn cat_fact(&self) -> Reply {
        settle(
            Service::CatFact,
            snippets::fetch_cat_fact(&self.http, &self.config.endpoints).await,
        )
    }

    pub async fn advice(&self) -> Reply {
        settle(
            Service::Advice,
            snippets::fetch_advice(&self.http, &self.config.endpoints).await,
        )
    }

    /// Current conditions for a place name.
    pub async fn weather(&self, place: &str) -> Reply {
        settle(
            Service::Weather,
            weather::fetch(&self.http, &self.config.endpoints, place).await,
        )
    }

    /// First definition of `word`.
    pub async fn define(&self, word: &str) -> Reply {
        settle(
            Service::Dictionary,
            dictionary::fetch(&self.http, &self.config.endpoints, word).await,
        )
    }

    /// Spot prices for space/comma separated tickers.
    pub async fn price(&self, symbols: &str) -> Reply {
        settle(
            Service::Price,
            price::fetch(&self.http, &self.config.endpoints, symbols).await,
        )
    }

    /// Stock quotes for space/comma separated symbols.
    pub async fn stock(&self, symbols: &str) -> Reply {
        settle(
            Service::Stock,
            stock::fetch(&self.http, &self.config.endpoints, symbols).await,
        )
    }

    /// Current time in `zone`, or in the caller's zone resolved by IP.
    pub async fn world_time(&self, zone: Option<&str>) -> Reply {
        settle(
            Service::WorldTime,
            worldtime::fetch(&self.http, &self.config.endpoints, zone).await,
        )
    }

    /// Public IP address of this machine.
    pub async fn ip(&self) -> Reply {
        settle(
            Service::Ip,
            ip::fetch(&self.http, &self.config.endpoints).await,
        )
    }
}
