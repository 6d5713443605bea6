//! Service configuration with sensible defaults.
//!
//! [`ServiceConfig`] holds the HTTP behaviour shared by every adapter and
//! the base URL of each upstream. Base URLs are overridable so the whole
//! crate can be pointed at a mock server.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ServiceError;

/// Configuration shared by all service adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// How many Hacker News stories the `hn` listing shows.
    pub hn_story_count: usize,
    /// Base URL of every upstream.
    pub endpoints: Endpoints,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: format!("upb/{}", env!("CARGO_PKG_VERSION")),
            hn_story_count: 5,
            endpoints: Endpoints::default(),
        }
    }
}

/// Base URLs of the upstream services.
///
/// Paths and query strings are appended by each adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub wikipedia: String,
    pub duckduckgo: String,
    pub xkcd: String,
    pub hacker_news: String,
    pub quote: String,
    pub joke: String,
    pub cat_fact: String,
    pub advice: String,
    pub geocoding: String,
    pub forecast: String,
    pub dictionary: String,
    pub price: String,
    pub stock: String,
    /// CSV provider used when the primary stock provider has nothing.
    pub stock_fallback: String,
    pub world_time: String,
    pub ip: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wikipedia: "https://en.wikipedia.org/api/rest_v1/page/summary".into(),
            duckduckgo: "https://api.duckduckgo.com".into(),
            xkcd: "https://xkcd.com".into(),
            hacker_news: "https://hacker-news.firebaseio.com/v0".into(),
            quote: "https://zenquotes.io/api/random".into(),
            joke: "https://official-joke-api.appspot.com/random_joke".into(),
            cat_fact: "https://catfact.ninja/fact".into(),
            advice: "https://api.adviceslip.com/advice".into(),
            geocoding: "https://geocoding-api.open-meteo.com/v1/search".into(),
            forecast: "https://api.open-meteo.com/v1/forecast".into(),
            dictionary: "https://api.dictionaryapi.dev/api/v2/entries/en".into(),
            price: "https://api.coingecko.com/api/v3/simple/price".into(),
            stock: "https://query1.finance.yahoo.com/v7/finance/quote".into(),
            stock_fallback: "https://stooq.com/q/l/".into(),
            world_time: "https://worldtimeapi.org/api".into(),
            ip: "https://api.ipify.org".into(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at `base`, keeping each default path.
    ///
    /// `base` has no trailing slash, e.g. `http://127.0.0.1:4321`. Used to
    /// route all adapters to a single mock server.
    pub fn rebased(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let defaults = Self::default();
        let rebase = |default: &str| -> String {
            match Url::parse(default) {
                Ok(parsed) => format!("{base}{}", parsed.path().trim_end_matches('/')),
                Err(_) => base.to_string(),
            }
        };
        Self {
            wikipedia: rebase(&defaults.wikipedia),
            duckduckgo: rebase(&defaults.duckduckgo),
            xkcd: rebase(&defaults.xkcd),
            hacker_news: rebase(&defaults.hacker_news),
            quote: rebase(&defaults.quote),
            joke: rebase(&defaults.joke),
            cat_fact: rebase(&defaults.cat_fact),
            advice: rebase(&defaults.advice),
            geocoding: rebase(&defaults.geocoding),
            forecast: rebase(&defaults.forecast),
            dictionary: rebase(&defaults.dictionary),
            price: rebase(&defaults.price),
            stock: rebase(&defaults.stock),
            stock_fallback: rebase(&defaults.stock_fallback),
            world_time: rebase(&defaults.world_time),
            ip: rebase(&defaults.ip),
        }
    }

    fn all(&self) -> [(&'static str, &str); 16] {
        [
            ("wikipedia", self.wikipedia.as_str()),
            ("duckduckgo", self.duckduckgo.as_str()),
            ("xkcd", self.xkcd.as_str()),
            ("hacker_news", self.hacker_news.as_str()),
            ("quote", self.quote.as_str()),
            ("joke", self.joke.as_str()),
            ("cat_fact", self.cat_fact.as_str()),
            ("advice", self.advice.as_str()),
            ("geocoding", self.geocoding.as_str()),
            ("forecast", self.forecast.as_str()),
            ("dictionary", self.dictionary.as_str()),
            ("price", self.price.as_str()),
            ("stock", self.stock.as_str()),
            ("stock_fallback", self.stock_fallback.as_str()),
            ("world_time", self.world_time.as_str()),
            ("ip", self.ip.as_str()),
        ]
    }
}

impl ServiceConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `hn_story_count` must be greater than 0
    /// - every endpoint must be an absolute `http` or `https` URL
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.timeout_seconds == 0 {
            return Err(ServiceError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.hn_story_count == 0 {
            return Err(ServiceError::Config(
                "hn_story_count must be greater than 0".into(),
            ));
        }
        for (name, endpoint) in self.endpoints.all() {
            let parsed = Url::parse(endpoint).map_err(|e| {
                ServiceError::Config(format!("endpoint {name} is not a valid URL: {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ServiceError::Config(format!(
                    "endpoint {name} must use http or https"
                )));
            }
        }
        Ok(())
    }
}
