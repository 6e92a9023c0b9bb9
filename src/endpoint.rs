//! Request URL construction.
//!
//! The service takes everything through the query string: credentials, the
//! requested image format and, for URL sources, the document location.
//! Values are form-urlencoded (space → `+`) by [`reqwest::Url`]'s query
//! serializer.

use crate::error::MsWordToImageError;
use crate::model::{Credentials, ImageFormat};
use reqwest::Url;

const API_KEY_PARAM: &str = "apiKey";

/// Build the conversion URL for one request.
///
/// Parameter order is fixed: `apiUser`, `apiKey`, `format`, then `extra` in
/// the given order.
pub fn build_url(
    endpoint: &str,
    credentials: &Credentials,
    format: ImageFormat,
    extra: &[(&str, &str)],
) -> Result<Url, MsWordToImageError> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        MsWordToImageError::InvalidConfiguration(format!(
            "endpoint '{endpoint}' is not a valid URL: {e}"
        ))
    })?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("apiUser", credentials.api_user())
            .append_pair(API_KEY_PARAM, credentials.api_key())
            .append_pair("format", format.as_str());
        for (key, value) in extra {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Render `url` for logs and error messages with the API key masked.
pub fn redact(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
