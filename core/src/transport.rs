//! HTTP transport for the catalog API.
//!
//! # Design
//! `Transport` executes requests and hands every received response back as
//! plain data (`RawResponse`), leaving status interpretation to the calling
//! operation and the classifier. The only failure it reports itself is the
//! absence of a response.

use bytes::Bytes;
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Status and body of a received response, before any interpretation.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// The body as lossy UTF-8, for error reporting.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes HTTP exchanges against a fixed base URL.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<RawResponse, FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(RawResponse { status, body })
    }

    /// GET `path`, optionally with query parameters.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, FetchError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request).await
    }

    /// Send a multipart form with the given method.
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<RawResponse, FetchError> {
        self.execute(self.http.request(method, self.url(path)).multipart(form))
            .await
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str) -> Result<RawResponse, FetchError> {
        self.execute(self.http.delete(self.url(path))).await
    }
}
