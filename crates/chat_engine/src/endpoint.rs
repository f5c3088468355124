use std::time::Duration;

use chat_core::Turn;
use serde::Serialize;
use serde_json::Value;

use crate::EndpointError;

pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3000/api/chat";

#[derive(Debug, Clone)]
pub struct EndpointSettings {
    pub url: String,
    pub connect_timeout: Duration,
    /// Overall request deadline. `None` waits for the endpoint indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Remote completion endpoint: takes the whole transcript, returns markdown.
#[async_trait::async_trait]
pub trait ChatEndpoint: Send + Sync {
    async fn complete(&self, conversation: &[Turn]) -> Result<String, EndpointError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    conversation: &'a [Turn],
}

#[derive(Debug, Clone)]
pub struct ReqwestEndpoint {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestEndpoint {
    pub fn new(settings: EndpointSettings) -> Result<Self, EndpointError> {
        let url = reqwest::Url::parse(&settings.url)
            .map_err(|err| EndpointError::InvalidUrl(format!("{}: {err}", settings.url)))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EndpointError::Network(err.to_string()))?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait::async_trait]
impl ChatEndpoint for ReqwestEndpoint {
    async fn complete(&self, conversation: &[Turn]) -> Result<String, EndpointError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&ChatRequest { conversation })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|err| EndpointError::Decode(err.to_string()))?;

        // Missing, null, non-string and empty results all count as "no response".
        match payload.get("result").and_then(Value::as_str) {
            Some(result) if !result.is_empty() => Ok(result.to_string()),
            _ => Err(EndpointError::EmptyResult),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> EndpointError {
    if err.is_timeout() {
        return EndpointError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return EndpointError::Decode(err.to_string());
    }
    EndpointError::Network(err.to_string())
}
