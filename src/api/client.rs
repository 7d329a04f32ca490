use reqwest::{header, Client as ReqwestClient, ClientBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::models::{Command, CommandRequest, CommandResponse, CommandResult, DeviceStatus, PowerState};

const SMARTTHINGS_BASE_URL: &str = "https://api.smartthings.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client for the SmartThings device API, scoped to a single device
pub struct SmartThingsClient {
    client: ReqwestClient,
    base_url: String,
    device_id: String,
}

#[derive(Default)]
pub struct SmartThingsClientBuilder {
    token: Option<String>,
    device_id: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl SmartThingsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<SmartThingsClient> {
        let token = self
            .token
            .ok_or_else(|| ApiError::Config("API token must be provided".to_string()))?;
        let device_id = self
            .device_id
            .ok_or_else(|| ApiError::Config("Device id must be provided".to_string()))?;

        let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::Config("API token contains invalid characters".to_string()))?;
        auth_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(ApiError::Network)?;

        Ok(SmartThingsClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| SMARTTHINGS_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            device_id,
        })
    }
}

impl SmartThingsClient {
    pub fn builder() -> SmartThingsClientBuilder {
        SmartThingsClientBuilder::new()
    }

    async fn request<T, R>(&self, method: reqwest::Method, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + Send + Sync + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = format!("{}/devices/{}/{}", self.base_url, self.device_id, path);
        debug!("Making request to {}", url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::Network)?;

        if response.status().is_success() {
            return response
                .json::<R>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()));
        }

        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unknown error"));

        error!("Server error: {} - {}", status, message);

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch the device's health record
    #[instrument(skip(self))]
    pub async fn get_status(&self) -> Result<DeviceStatus> {
        self.request::<(), _>(reqwest::Method::GET, "health", None)
            .await
    }

    /// Submit a single command and return its result
    #[instrument(skip(self))]
    pub async fn run_command(&self, command: Command) -> Result<CommandResult> {
        let request = CommandRequest {
            commands: vec![command],
        };

        if let Ok(body) = serde_json::to_string(&request) {
            debug!("Command request body: {}", body);
        }

        let response: CommandResponse = self
            .request(reqwest::Method::POST, "commands", Some(&request))
            .await?;

        // The API returns one result per submitted command; an empty array
        // means the command was silently dropped.
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("Command response contained no results".to_string()))
    }

    /// Power the device on or off
    #[instrument(skip(self))]
    pub async fn set_power(&self, state: PowerState) -> Result<CommandResult> {
        self.run_command(Command::set_power(state)).await
    }

    /// Switch the device's media input source
    #[instrument(skip(self))]
    pub async fn set_source(&self, source: &str) -> Result<CommandResult> {
        self.run_command(Command::set_source(source)).await
    }
}
