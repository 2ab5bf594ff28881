//! Shared JSON-over-HTTP plumbing for the backend adapters.

use cardvote_core::error::{CardVoteError, Result};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin wrapper around `reqwest::Client` bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Every request fails with a transport error once `timeout` elapses.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CardVoteError::config(format!("Failed to build HTTP client: {err}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path`, optionally with a bearer credential.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, bearer: Option<&str>) -> Result<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        self.execute(path, request).await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(path, request).await
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        tracing::debug!("Dispatching request to {}", path);

        let response = request.send().await.map_err(|err| {
            tracing::error!("Request to {} failed: {}", path, err);
            CardVoteError::transport(format!("{path}: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!("Request to {} answered {}", path, status);
            return Err(CardVoteError::http(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| CardVoteError::transport(format!("{path}: {err}")))?;

        // Bodyless 2xx answers decode like an empty object.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("{}")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
