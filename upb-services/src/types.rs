//! Core types: the title/body reply every adapter produces and the
//! identification of upstream services.

use std::fmt;

use crate::error::ServiceError;

/// Title used for every failed fetch.
pub const ERROR_TITLE: &str = "Error";

/// A title/body pair ready to print.
///
/// Every adapter produces one, including on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: String,
    pub body: String,
}

impl Reply {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Render a failure from `service` as `("Error", "<Service> fetch failed: <err>")`.
    pub fn error(service: Service, err: &ServiceError) -> Self {
        Self::new(ERROR_TITLE, format!("{} fetch failed: {err}", service.name()))
    }
}

/// Upstream services the browser can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Encyclopedia page summaries.
    Wikipedia,
    /// Instant answers.
    DuckDuckGo,
    /// Comic metadata.
    Xkcd,
    /// Top story listing.
    HackerNews,
    Quote,
    Joke,
    CatFact,
    Advice,
    /// Geocoding plus current conditions.
    Weather,
    Dictionary,
    /// Cryptocurrency spot prices.
    Price,
    /// Stock quotes, with a CSV fallback provider.
    Stock,
    WorldTime,
    Ip,
}

impl Service {
    /// Returns the human-readable name of this service.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wikipedia => "Wikipedia",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Xkcd => "XKCD",
            Self::HackerNews => "Hacker News",
            Self::Quote => "Quote",
            Self::Joke => "Joke",
            Self::CatFact => "Cat fact",
            Self::Advice => "Advice",
            Self::Weather => "Weather",
            Self::Dictionary => "Dictionary",
            Self::Price => "Price",
            Self::Stock => "Stock",
            Self::WorldTime => "World time",
            Self::Ip => "IP lookup",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
