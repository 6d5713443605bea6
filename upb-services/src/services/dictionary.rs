//! Word definitions from the Free Dictionary API.

use serde::Deserialize;
use serde_json::Value;

use crate::config::Endpoints;
use crate::encode::quote_plus;
use crate::error::{Result, ServiceError};
use crate::http::HttpClient;
use crate::lenient::lenient;
use crate::types::Reply;

#[derive(Debug, Default, Deserialize)]
struct Entry {
    #[serde(default, deserialize_with = "lenient")]
    word: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    meanings: Option<Vec<Meaning>>,
}

#[derive(Debug, Default, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech", default, deserialize_with = "lenient")]
    part_of_speech: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    definitions: Option<Vec<Definition>>,
}

#[derive(Debug, Default, Deserialize)]
struct Definition {
    #[serde(default, deserialize_with = "lenient")]
    definition: Option<String>,
}

pub(crate) async fn fetch(http: &HttpClient, endpoints: &Endpoints, word: &str) -> Result<Reply> {
    tracing::trace!(word, "dictionary lookup");
    let url = format!("{}/{}", endpoints.dictionary, quote_plus(word));
    match http.get_json(&url).await {
        Ok(value) => Ok(parse_entries(value, word)),
        // Unknown words are reported with 404.
        Err(ServiceError::Status(404, _)) => Ok(no_definition(word)),
        Err(e) => Err(e),
    }
}

/// First entry, first meaning, first definition.
///
/// Anything missing along that path, including a non-array payload,
/// yields the "no definition" reply.
pub(crate) fn parse_entries(value: Value, word: &str) -> Reply {
    let first_entry = match value {
        Value::Array(entries) => entries
            .into_iter()
            .next()
            .and_then(|entry| serde_json::from_value::<Entry>(entry).ok()),
        _ => None,
    };
    let Some(entry) = first_entry else {
        return no_definition(word);
    };

    let title = entry.word.unwrap_or_else(|| word.to_string());
    let Some(meaning) = entry.meanings.and_then(|m| m.into_iter().next()) else {
        return no_definition(word);
    };
    let Some(definition) = meaning
        .definitions
        .and_then(|d| d.into_iter().next())
        .and_then(|d| d.definition)
    else {
        return no_definition(word);
    };

    let body = match meaning.part_of_speech {
        Some(pos) => format!("({pos}) {definition}"),
        None => definition,
    };
    Reply::new(title, body)
}

fn no_definition(word: &str) -> Reply {
    Reply::new("Define", format!("No definition found for '{word}'."))
}
