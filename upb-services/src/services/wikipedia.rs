//! Encyclopedia page summaries from the Wikipedia REST API.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::wiki_title;
use crate::error::Result;
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

use super::decode;

const NO_TITLE: &str = "No Title";
const NO_CONTENT: &str = "No content.";

#[derive(Debug, Default, Deserialize)]
struct Summary {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    extract: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, term: &str) -> Result<Reply> {
    tracing::trace!(term, "Wikipedia summary");
    let url = format!("{}/{}", endpoints.wikipedia, wiki_title(term));
    parse_summary(http.get_json(&url).await?)
}

/// Extract `title` and `extract` from a page summary.
pub(crate) fn parse_summary(value: Value) -> Result<Reply> {
    let summary: Summary = decode(value)?;
    Ok(Reply::new(
        summary.title.unwrap_or_else(|| NO_TITLE.to_string()),
        summary.extract.unwrap_or_else(|| NO_CONTENT.to_string()),
    ))
}
