//! Hacker News top stories.
//!
//! One request for the ranked id list, then one per story. A story that
//! fails to load is skipped; the listing keeps the upstream order.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::error::{Result, ServiceError};
use crate::http::HttpClient;
use crate::lenient::{lenient, scalar_text};
use crate::types::Reply;

use super::decode;

const TITLE: &str = "Hacker News Top";
const NO_STORIES: &str = "No stories found.";

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Story {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, count: usize) -> Result<Reply> {
    let base = &endpoints.hacker_news;
    let ids = parse_top_ids(http.get_json(&format!("{base}/topstories.json")).await?, count)?;
    tracing::debug!(count = ids.len(), "fetching stories");

    let mut stories = Vec::with_capacity(ids.len());
    for id in ids {
        let url = format!("{base}/item/{id}.json");
        match http.get_json(&url).await.and_then(decode::<Story>) {
            Ok(story) => stories.push(story),
            Err(err) => tracing::warn!(%id, error = %err, "skipping story"),
        }
    }

    Ok(format_stories(&stories))
}

/// The first `count` ids of the ranked list.
pub(crate) fn parse_top_ids(value: Value, count: usize) -> Result<Vec<String>> {
    let Value::Array(ids) = value else {
        return Err(ServiceError::Parse("story list is not an array".into()));
    };
    Ok(ids.iter().take(count).filter_map(scalar_text).collect())
}

pub(crate) fn format_stories(stories: &[Story]) -> Reply {
    if stories.is_empty() {
        return Reply::new(TITLE, NO_STORIES);
    }
    let body = stories
        .iter()
        .map(|story| {
            format!(
                "- {}\n  {}",
                story.title.as_deref().unwrap_or("No title"),
                story.url.as_deref().unwrap_or("No URL")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    Reply::new(TITLE, body)
}
