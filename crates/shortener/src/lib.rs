//! Client for the link-shortening service.
//!
//! `POST {endpoint}` with `{"url": ...}` and an optional `x-api-key` header; a 200
//! response carries `{"shortened_url": ...}`. Anything else is an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uploader_core::config::ShortenerConfig;
use uploader_core::{IntegrationError, LinkShortener};

const SERVICE: &str = "shortener";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    shortened_url: String,
}

#[derive(Clone)]
pub struct HttpLinkShortener {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpLinkShortener {
    pub fn new(
        endpoint: &str,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, IntegrationError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("slack-file-uploader"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout.max(Duration::from_secs(1)))
            .build()
            .map_err(|error| IntegrationError::Transport {
                service: SERVICE,
                message: format!("failed to build http client: {error}"),
            })?;
        Ok(Self { http, endpoint: endpoint.to_owned(), api_key })
    }

    pub fn from_config(config: &ShortenerConfig) -> Result<Self, IntegrationError> {
        Self::new(
            &config.endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl LinkShortener for HttpLinkShortener {
    async fn shorten(&self, url: &str) -> Result<String, IntegrationError> {
        let mut request = self.http.post(&self.endpoint).json(&ShortenRequest { url });
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key.expose_secret());
        }

        let response = request.send().await.map_err(|error| IntegrationError::Transport {
            service: SERVICE,
            message: error.to_string(),
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::HttpStatus {
                service: SERVICE,
                status: status.as_u16(),
                detail: body.chars().take(200).collect(),
            });
        }

        let body: ShortenResponse =
            response.json().await.map_err(|error| IntegrationError::InvalidResponse {
                service: SERVICE,
                message: format!("expected `shortened_url`: {error}"),
            })?;
        if body.shortened_url.trim().is_empty() {
            return Err(IntegrationError::InvalidResponse {
                service: SERVICE,
                message: "`shortened_url` is empty".to_owned(),
            });
        }

        debug!(event_name = "egress.shortener.shortened", "shortened presigned link");
        Ok(body.shortened_url)
    }
}
