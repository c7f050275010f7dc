//! HTTP client for the memehub API.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::config::HubConfig;
use super::types::{HubResponse, MemeRecord};
use crate::error::{HubError, Result};

/// Client for communicating with a memehub service.
///
/// The client can be built with an endpoint up front ([`HubClient::new`]) or
/// without one ([`HubClient::unconfigured`]) and pointed at a hub later via
/// [`HubClient::initialize`]. Once set, the endpoint never changes.
///
/// Each operation comes in two flavors: a `try_` method that returns a typed
/// [`HubError`], and a best-effort method that logs the failure at error
/// level and collapses it to `None`.
#[derive(Debug, Clone)]
pub struct HubClient {
    client: Client,
    base_url: Option<String>,
}

impl HubClient {
    /// Create a new hub client with the given base URL.
    ///
    /// Trailing slashes are trimmed so the URL composes cleanly with request
    /// paths. An empty URL leaves the client unconfigured, as if built with
    /// [`HubClient::unconfigured`].
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: non_empty(base_url.into()),
        })
    }

    /// Create a hub client with no endpoint.
    ///
    /// Operations fail with [`HubError::NotConfigured`] until
    /// [`HubClient::initialize`] is called.
    pub fn unconfigured() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base_url: None,
        })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        Self::new(&config.url)
    }

    /// Create a client with default configuration.
    pub fn from_default_config() -> Result<Self> {
        let config = HubConfig::load();
        Self::from_config(&config)
    }

    /// Set the base URL if none is configured yet.
    ///
    /// The first configured endpoint wins for the lifetime of the client;
    /// later calls are no-ops. An empty URL is ignored; trailing slashes are
    /// trimmed.
    pub fn initialize(&mut self, base_url: impl Into<String>) {
        if self.base_url.is_none() {
            self.base_url = non_empty(base_url.into());
        }
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Upload a structured record, logging and swallowing any failure.
    ///
    /// Returns the hub's JSON reply on success, `None` otherwise.
    pub async fn upload_meme(&self, owner: &str, id: &str, message: &str) -> Option<HubResponse> {
        match self.try_upload_meme(owner, id, message).await {
            Ok(response) => Some(response),
            Err(err) => {
                error!(%owner, %id, error = %err, "meme upload failed");
                None
            }
        }
    }

    /// Upload a structured record to `/api/upload`.
    pub async fn try_upload_meme(
        &self,
        owner: &str,
        id: &str,
        message: &str,
    ) -> Result<HubResponse> {
        let url = self.endpoint("/api/upload")?;
        let record = MemeRecord::new(owner, id, message);
        let response = self.client.post(&url).json(&record).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HubError::Status { status, body });
        }

        let body = response.bytes().await?;
        let parsed: HubResponse = serde_json::from_slice(&body)?;
        debug!(reply = ?parsed, "upload done");
        Ok(parsed)
    }

    /// Upload raw bytes, logging and swallowing any failure.
    ///
    /// Returns the hub's JSON reply on success, `None` otherwise.
    pub async fn upload_data(
        &self,
        owner: &str,
        filename: &str,
        data: Vec<u8>,
    ) -> Option<HubResponse> {
        match self.try_upload_data(owner, filename, data).await {
            Ok(response) => Some(response),
            Err(err) => {
                error!(%owner, %filename, error = %err, "data upload failed");
                None
            }
        }
    }

    /// Upload raw bytes to `/api/uploadData` as a multipart form.
    ///
    /// The payload travels as a `file` part named after `filename` with an
    /// `application/octet-stream` content type; the owner rides along as a
    /// plain `owner` field.
    pub async fn try_upload_data(
        &self,
        owner: &str,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<HubResponse> {
        let url = self.endpoint("/api/uploadData")?;
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", part)
            .text("owner", owner.to_string());
        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HubError::Status { status, body });
        }

        let body = response.bytes().await?;
        let parsed: HubResponse = serde_json::from_slice(&body)?;
        debug!(reply = ?parsed, "upload done");
        Ok(parsed)
    }

    /// Download raw bytes, logging and swallowing any failure.
    pub async fn download_data(&self, owner: &str, filename: &str) -> Option<Bytes> {
        match self.try_download_data(owner, filename).await {
            Ok(data) => Some(data),
            Err(err) => {
                error!(%owner, %filename, error = %err, "data download failed");
                None
            }
        }
    }

    /// Download raw bytes from `/api/download`.
    ///
    /// The request is a urlencoded form (`id=<filename>&owner=<owner>`); the
    /// hub answers with the stored payload verbatim.
    pub async fn try_download_data(&self, owner: &str, filename: &str) -> Result<Bytes> {
        let url = self.endpoint("/api/download")?;
        debug!(%owner, %filename, %url, "downloading from hub");
        let response = self
            .client
            .post(&url)
            .form(&[("id", filename), ("owner", owner)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HubError::Status { status, body });
        }

        Ok(response.bytes().await?)
    }

    fn endpoint(&self, path: &str) -> Result<String> {
        match &self.base_url {
            Some(base) => Ok(format!("{}{}", base, path)),
            None => Err(HubError::NotConfigured),
        }
    }
}

fn build_http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?)
}

fn non_empty(mut url: String) -> Option<String> {
    let trimmed = url.trim_end_matches('/').len();
    url.truncate(trimmed);
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}
