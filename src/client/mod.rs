use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::model::{ListResponse, Record};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/logs";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API URL: {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Remote side of the record store: list everything, create one.
pub trait LogStore {
    fn list(&self) -> impl Future<Output = Result<Vec<Record>, ClientError>> + Send;

    /// The created entry as echoed back by the remote end.
    fn create(
        &self,
        record: &Record,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send;
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
        }
    }
}

/// [`LogStore`] backed by the remote HTTP API.
#[derive(Clone, Debug)]
pub struct HttpLogStore {
    client: reqwest::Client,
    list_url: String,
    create_url: String,
}

impl HttpLogStore {
    pub fn new(options: &ClientOptions) -> Result<Self, ClientError> {
        let base = options.api_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base).map_err(|e| ClientError::InvalidUrl {
            url: options.api_url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "logbook/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = options.api_key.as_deref() {
            let value = reqwest::header::HeaderValue::from_str(key)
                .map_err(|_| ClientError::InvalidApiKey)?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(options.timeout_seconds));
        if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy_cfg =
                reqwest::Proxy::all(proxy).map_err(|source| ClientError::ProxySetup {
                    proxy: proxy.to_string(),
                    source,
                })?;
            builder = builder.proxy(proxy_cfg);
        }
        let client = builder
            .build()
            .map_err(|source| ClientError::HttpClientBuild { source })?;

        Ok(Self {
            client,
            create_url: format!("{base}/log"),
            list_url: base,
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    pub fn create_url(&self) -> &str {
        &self.create_url
    }
}

async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

impl LogStore for HttpLogStore {
    async fn list(&self) -> Result<Vec<Record>, ClientError> {
        let endpoint = self.list_url.as_str();
        tracing::debug!(endpoint, "fetching logs");
        let resp = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let resp = check_status(endpoint, resp).await?;
        let body: ListResponse = resp.json().await.map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
        tracing::debug!(endpoint, count = body.logs.len(), "fetched logs");
        Ok(body.logs)
    }

    async fn create(&self, record: &Record) -> Result<serde_json::Value, ClientError> {
        let endpoint = self.create_url.as_str();
        tracing::debug!(endpoint, event_type = %record.event_type, "creating log");
        let resp = self
            .client
            .post(endpoint)
            .json(record)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let resp = check_status(endpoint, resp).await?;
        let text = resp.text().await.map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
