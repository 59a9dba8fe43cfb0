//! Shared JSON request helper for the collaborator HTTP clients.

use std::time::Duration;

use anyhow::Context;
use caseflow_types::{OrchestrationError, Result};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over `reqwest::Client` bound to one collaborator's base URL.
///
/// Non-2xx responses become `OrchestrationError::Remote` (404 becomes
/// `EntityNotFound`); transport and decode failures become `Internal`.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    service: &'static str,
}

impl RestClient {
    pub fn new(service: &'static str, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_expect_body(Method::GET, path, Option::<&()>::None)
            .await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send_expect_body(Method::POST, path, Some(body)).await
    }

    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::POST, path, Some(body)).await.map(|_| ())
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::PUT, path, Some(body)).await.map(|_| ())
    }

    async fn send_expect_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        response
            .json()
            .await
            .with_context(|| format!("decoding response from {} {}", self.service, path))
            .map_err(OrchestrationError::from)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("calling {} {}", self.service, path))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!(service = self.service, %url, %status, "collaborator call failed");

        if status == StatusCode::NOT_FOUND {
            return Err(OrchestrationError::EntityNotFound(format!(
                "{} has no resource at {}",
                self.service, path
            )));
        }

        Err(OrchestrationError::Remote {
            service: self.service,
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        })
    }
}
