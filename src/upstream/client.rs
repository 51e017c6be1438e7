//! Shared HTTP client for upstream JSON APIs.
//!
//! One call = one request bounded by the configured timeout. No retries.

use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::types::{Error, Result, UpstreamConfig};

/// JSON client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, config: &UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("Base URL cannot have paths: {}", base_url)));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL from the base plus percent-encoded path segments.
    /// A trailing `""` segment yields a trailing slash.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET` a JSON document.
    pub async fn get_json<Q>(&self, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.url(segments);
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url).query(query)).await
    }

    /// `POST` a JSON body and read a JSON document back.
    pub async fn post_json<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments);
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("Upstream {} returned {}", self.base_url, status);
            return Err(Error::upstream(format!("{} {}", status, error_text.trim())));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

/// Pull the `locations` array out of a dining API response.
/// A missing or non-array field means no locations.
pub fn locations_field(body: &Value) -> Vec<Value> {
    body.get("locations")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, &UpstreamConfig::default()).unwrap()
    }

    #[test]
    fn test_url_encodes_segments() {
        let api = client("https://dining.example.org");
        assert_eq!(
            api.url(&["location", "Au Bon Pain"]).as_str(),
            "https://dining.example.org/location/Au%20Bon%20Pain"
        );
        assert_eq!(
            api.url(&["location", "a/b?c"]).as_str(),
            "https://dining.example.org/location/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_url_trailing_slash() {
        let api = client("https://courses.example.org/");
        assert_eq!(
            api.url(&["courses", "search", ""]).as_str(),
            "https://courses.example.org/courses/search/"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let api = client("http://localhost:8080/api/");
        assert_eq!(api.url(&["locations"]).as_str(), "http://localhost:8080/api/locations");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url", &UpstreamConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_locations_field() {
        assert_eq!(locations_field(&json!({"locations": [{"name": "A"}]})).len(), 1);
        assert!(locations_field(&json!({})).is_empty());
        assert!(locations_field(&json!({"locations": null})).is_empty());
    }
}
