//! REST client for the remote dinosaur collection.
//!
//! Wraps the five JSON-over-HTTP endpoints of a crudcrud or mockapi
//! resource using [`reqwest`]. Each call is exactly one request with no
//! retry.

use std::time::Duration;

use async_trait::async_trait;
use dinodex_core::error::RequestError;
use dinodex_core::model::{Dinosaur, NewDinosaur};
use dinodex_core::store::RecordStore;
use reqwest::{StatusCode, Url};

use crate::flavor::StoreFlavor;

/// HTTP client for a single remote collection.
pub struct RecordStoreClient {
    client: reqwest::Client,
    base_url: Url,
    flavor: StoreFlavor,
}

impl RecordStoreClient {
    /// Create a client with default `reqwest` settings (no timeout).
    ///
    /// * `base_url` - Collection URL, e.g. `https://<project>.mockapi.io/Dinosaur`.
    pub fn new(base_url: Url, flavor: StoreFlavor) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, flavor)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: Url, flavor: StoreFlavor) -> Self {
        Self {
            client,
            base_url,
            flavor,
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn from_config(
        base_url: Url,
        flavor: StoreFlavor,
        timeout: Duration,
    ) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self::with_client(client, base_url, flavor))
    }

    /// `POST {base}` with a feature-less record.
    pub async fn create_dinosaur(&self, input: &NewDinosaur) -> Result<Dinosaur, RequestError> {
        tracing::debug!(url = %self.base_url, "POST dinosaur");

        let response = self
            .client
            .post(self.base_url.clone())
            .json(&self.flavor.create_body(input))
            .send()
            .await
            .map_err(transport)?;

        Self::parse_response(response, None).await
    }

    /// `GET {base}`.
    pub async fn list_dinosaurs(&self) -> Result<Vec<Dinosaur>, RequestError> {
        tracing::debug!(url = %self.base_url, "GET dinosaurs");

        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(transport)?;

        Self::parse_response(response, None).await
    }

    /// `GET {base}/{id}`.
    pub async fn get_dinosaur(&self, id: &str) -> Result<Dinosaur, RequestError> {
        let url = self.record_url(id);
        tracing::debug!(%url, "GET dinosaur");

        let response = self.client.get(url).send().await.map_err(transport)?;

        Self::parse_response(response, Some(id)).await
    }

    /// `PUT {base}/{id}` with the complete record.
    ///
    /// crudcrud answers with an empty body; in that case the record that
    /// was sent is returned.
    pub async fn update_dinosaur(&self, dinosaur: &Dinosaur) -> Result<Dinosaur, RequestError> {
        let url = self.record_url(&dinosaur.id);
        tracing::debug!(
            %url,
            features = dinosaur.features.len(),
            "PUT dinosaur"
        );

        let response = self
            .client
            .put(url)
            .json(&self.flavor.update_body(dinosaur))
            .send()
            .await
            .map_err(transport)?;

        let response = Self::ensure_success(response, Some(&dinosaur.id)).await?;
        let body = response.text().await.map_err(transport)?;
        if body.trim().is_empty() {
            return Ok(dinosaur.clone());
        }
        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// `DELETE {base}/{id}`. Nested features go with the record.
    pub async fn delete_dinosaur(&self, id: &str) -> Result<(), RequestError> {
        let url = self.record_url(id);
        tracing::debug!(%url, "DELETE dinosaur");

        let response = self.client.delete(url).send().await.map_err(transport)?;

        Self::ensure_success(response, Some(id)).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// `{base}/{id}`, with `id` percent-encoded as a single path segment.
    fn record_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    /// Return the response unchanged on a success status. A 404 on a
    /// single-record URL becomes [`RequestError::NotFound`]; any other
    /// failure status becomes [`RequestError::Status`] with the body text.
    async fn ensure_success(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<reqwest::Response, RequestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(RequestError::NotFound { id: id.to_string() });
            }
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(RequestError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<T, RequestError> {
        let response = Self::ensure_success(response, id).await?;
        response.json::<T>().await.map_err(transport)
    }
}

#[async_trait]
impl RecordStore for RecordStoreClient {
    async fn create(&self, input: &NewDinosaur) -> Result<Dinosaur, RequestError> {
        self.create_dinosaur(input).await
    }

    async fn list(&self) -> Result<Vec<Dinosaur>, RequestError> {
        self.list_dinosaurs().await
    }

    async fn get(&self, id: &str) -> Result<Dinosaur, RequestError> {
        self.get_dinosaur(id).await
    }

    async fn update(&self, dinosaur: &Dinosaur) -> Result<Dinosaur, RequestError> {
        self.update_dinosaur(dinosaur).await
    }

    async fn delete(&self, id: &str) -> Result<(), RequestError> {
        self.delete_dinosaur(id).await
    }
}

/// `segment` percent-encoded as a single URL path segment, the same way
/// record URLs are built.
pub fn path_segment(segment: &str) -> String {
    Url::parse("http://localhost/")
        .map(|mut url| {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.clear().push(segment);
            }
            url.path().trim_start_matches('/').to_string()
        })
        .unwrap_or_else(|_| segment.to_string())
}

/// Map a `reqwest` failure into the store error taxonomy.
fn transport(err: reqwest::Error) -> RequestError {
    if err.is_decode() {
        RequestError::Decode(err.to_string())
    } else {
        RequestError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RecordStoreClient {
        RecordStoreClient::new(Url::parse(base).unwrap(), StoreFlavor::MockApi)
    }

    #[test]
    fn record_url_appends_id_segment() {
        let c = client("https://example.mockapi.io/Dinosaur");
        assert_eq!(
            c.record_url("12").as_str(),
            "https://example.mockapi.io/Dinosaur/12"
        );
    }

    #[test]
    fn record_url_tolerates_trailing_slash() {
        let c = client("https://crudcrud.com/api/abc/dinosaurs/");
        assert_eq!(
            c.record_url("63a1").as_str(),
            "https://crudcrud.com/api/abc/dinosaurs/63a1"
        );
    }

    #[test]
    fn path_segment_matches_record_url_encoding() {
        let c = client("http://localhost:9/dinos");
        let id = "a/b c?d";
        assert_eq!(
            c.record_url(id).as_str(),
            format!("http://localhost:9/dinos/{}", path_segment(id))
        );
        assert_eq!(path_segment("63a1-f"), "63a1-f");
    }

    #[test]
    fn record_url_encodes_path_characters() {
        let c = client("http://localhost:9/dinos");
        assert_eq!(c.record_url("a/b").as_str(), "http://localhost:9/dinos/a%2Fb");
    }

    #[tokio::test]
    async fn unreachable_store_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let c = client("http://127.0.0.1:9/dinos");
        let err = c.list_dinosaurs().await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)), "got {err:?}");
    }
}
