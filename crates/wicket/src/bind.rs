//! Content-type negotiated request body binding.

use serde::de::DeserializeOwned;

use crate::Error;

/// Strip media-type parameters: `application/json; charset=utf-8` becomes
/// `application/json`.
pub(crate) fn media_type(content_type: &str) -> &str {
    content_type
        .split([';', ' '])
        .next()
        .unwrap_or(content_type)
        .trim()
}

/// Deserialize a request body according to its declared content type.
///
/// Supports `application/json`, `text/xml`/`application/xml`, and
/// `application/x-www-form-urlencoded`. Anything else is
/// [`Error::UnsupportedContentType`].
pub fn from_body<T: DeserializeOwned>(content_type: Option<&str>, body: &[u8]) -> Result<T, Error> {
    let declared = content_type.unwrap_or_default();
    match media_type(declared) {
        "application/json" => from_json(body),
        "text/xml" | "application/xml" => from_xml(body),
        "application/x-www-form-urlencoded" => from_form(body),
        other => Err(Error::UnsupportedContentType(other.to_string())),
    }
}

pub(crate) fn from_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) fn from_xml<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(quick_xml::de::from_reader(body)?)
}

/// Deserialize a form-encoded body. Pairs are percent-decoded by
/// `form_urlencoded` and handed to serde as a string map; a repeated key
/// keeps its last value.
pub(crate) fn from_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    let fields: serde_json::Map<String, serde_json::Value> = form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
        .collect();
    Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
}
