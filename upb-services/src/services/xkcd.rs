//! Comic metadata from xkcd's JSON interface.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::{lenient, text_or_number};
use crate::types::Reply;

use super::decode;

#[derive(Debug, Default, Deserialize)]
struct Comic {
    #[serde(default, deserialize_with = "text_or_number")]
    num: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    alt: Option<String>,
}

/// URL of comic `number`, or of the latest comic.
pub(crate) fn comic_url(endpoints: &Endpoints, number: Option<u32>) -> String {
    match number {
        Some(n) => format!("{}/{n}/info.0.json", endpoints.xkcd),
        None => format!("{}/info.0.json", endpoints.xkcd),
    }
}

pub(crate) async fn fetch(
    http: &HttpClient,
    endpoints: &Endpoints,
    number: Option<u32>,
) -> Result<Reply> {
    tracing::trace!(?number, "xkcd comic");
    parse_comic(http.get_json(&comic_url(endpoints, number)).await?)
}

/// Title is `#<num> - <title>`; the alt text is the body.
pub(crate) fn parse_comic(value: Value) -> Result<Reply> {
    let comic: Comic = decode(value)?;
    let num = comic.num.unwrap_or_else(|| "???".to_string());
    let title = comic.title.unwrap_or_else(|| "No title".to_string());
    Ok(Reply::new(
        format!("#{num} - {title}"),
        comic.alt.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbered_and_latest_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            comic_url(&endpoints, Some(500)),
            "https://xkcd.com/500/info.0.json"
        );
        assert_eq!(comic_url(&endpoints, None), "https://xkcd.com/info.0.json");
    }

    #[test]
    fn formats_title_with_number() {
        let reply = parse_comic(json!({
            "num": 353,
            "title": "Python",
            "alt": "I wrote 20 short programs in Python yesterday."
        }))
        .expect("parse");
        assert_eq!(reply.title, "#353 - Python");
        assert!(reply.body.contains("20 short programs"));
    }

    #[test]
    fn missing_fields_use_fallbacks() {
        let reply = parse_comic(json!({})).expect("parse");
        assert_eq!(reply, Reply::new("#??? - No title", ""));
    }
}
