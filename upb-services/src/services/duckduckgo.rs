//! Instant answers from the DuckDuckGo JSON API.
//!
//! Prefers the abstract text, then the first related topic, then a fixed
//! "no answer" string.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::decode;

const DEFAULT_HEADING: &str = "DuckDuckGo Search";
const NO_ANSWER: &str = "No direct answer found.";

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Heading", default, deserialize_with = "lenient")]
    heading: Option<String>,
    #[serde(rename = "AbstractText", default, deserialize_with = "lenient")]
    abstract_text: Option<String>,
    #[serde(rename = "RelatedTopics", default, deserialize_with = "lenient")]
    related_topics: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct Topic {
    #[serde(rename = "Text", default, deserialize_with = "lenient")]
    text: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, query: &str) -> Result<Reply> {
    tracing::trace!(query, "DuckDuckGo instant answer");
    let url = format!(
        "{}/?q={}&format=json&no_html=1",
        endpoints.duckduckgo,
        quote_plus(query)
    );
    parse_instant_answer(http.get_json(&url).await?)
}

pub(crate) fn parse_instant_answer(value: Value) -> Result<Reply> {
    let answer: InstantAnswer = decode(value)?;

    let title = answer
        .heading
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HEADING.to_string());

    let body = answer
        .abstract_text
        .filter(|text| !text.is_empty())
        .or_else(|| first_topic_text(answer.related_topics))
        .unwrap_or_else(|| NO_ANSWER.to_string());

    Ok(Reply::new(title, body))
}

fn first_topic_text(topics: Option<Vec<Value>>) -> Option<String> {
    let first = topics?.into_iter().next()?;
    let topic: Topic = serde_json::from_value(first).ok()?;
    topic.text.filter(|text| !text.is_empty())
}
