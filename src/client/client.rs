//! Elasticsearch REST client for index templates and mappings.
//!
//! # Responsibilities
//! - Build requests against the configured cluster URL
//! - Attach basic auth when credentials are configured
//! - Turn non-success responses into `EsError::Status`
//! - Retry idempotent reads

use std::time::Duration;

use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

use crate::client::types::{error_reason, EsError, EsResult};
use crate::config::{ConnectionConfig, RetryConfig};
use crate::resilience::retry_idempotent;

/// Thin wrapper over the template, alias and mapping APIs.
#[derive(Clone)]
pub struct EsClient {
    http: reqwest::Client,
    base: Url,
    credentials: Option<(String, String)>,
    retry: RetryConfig,
}

impl EsClient {
    /// Create a client for the cluster described by `connection`.
    pub fn new(connection: &ConnectionConfig, retry: RetryConfig) -> EsResult<Self> {
        let base = Url::parse(&connection.host).map_err(|e| EsError::InvalidUrl {
            url: connection.host.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(EsError::InvalidUrl {
                url: connection.host.clone(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(connection.timeout_secs))
            .build()
            .map_err(EsError::Client)?;

        let credentials = connection
            .credentials()
            .map(|(user, password)| (user.to_string(), password.to_string()));

        tracing::debug!(
            host = %base,
            authenticated = credentials.is_some(),
            timeout_secs = connection.timeout_secs,
            "Elasticsearch client initialized"
        );

        Ok(Self {
            http,
            base,
            credentials,
            retry,
        })
    }

    /// `PUT /_template/{name}`
    pub async fn put_template(&self, name: &str, body: &Value) -> EsResult<Value> {
        let url = self.endpoint(&["_template", name])?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// `GET /_template/{name}`
    pub async fn get_template(&self, name: &str) -> EsResult<Value> {
        let url = self.endpoint(&["_template", name])?;
        self.get(url).await
    }

    /// `GET /_template`, keyed by template name.
    pub async fn list_templates(&self) -> EsResult<Map<String, Value>> {
        let url = self.endpoint(&["_template"])?;
        let path = url.path().to_string();
        match self.get(url).await? {
            Value::Object(map) => Ok(map),
            other => Err(EsError::Decode {
                path,
                reason: format!("expected an object, got {}", json_kind(&other)),
            }),
        }
    }

    /// `DELETE /_template/{name}`
    pub async fn delete_template(&self, name: &str) -> EsResult<Value> {
        let url = self.endpoint(&["_template", name])?;
        self.send(Method::DELETE, url, None).await
    }

    /// `GET /{pattern}/_alias`, returning the names of the matching indices.
    pub async fn get_alias(&self, pattern: &str) -> EsResult<Vec<String>> {
        let url = self.endpoint(&[pattern, "_alias"])?;
        let path = url.path().to_string();
        match self.get(url).await? {
            Value::Object(map) => Ok(map.into_iter().map(|(index, _)| index).collect()),
            other => Err(EsError::Decode {
                path,
                reason: format!("expected an object, got {}", json_kind(&other)),
            }),
        }
    }

    /// `GET /{index}/_mapping`
    pub async fn get_mapping(&self, index: &str) -> EsResult<Value> {
        let url = self.endpoint(&[index, "_mapping"])?;
        self.get(url).await
    }

    /// `PUT /{index}/_mapping`
    pub async fn put_mapping(&self, index: &str, mappings: &Value) -> EsResult<Value> {
        let url = self.endpoint(&[index, "_mapping"])?;
        self.send(Method::PUT, url, Some(mappings)).await
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> EsResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| EsError::InvalidUrl {
                url: self.base.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> EsResult<Value> {
        let label = url.path().to_string();
        retry_idempotent(&self.retry, &label, || self.send(Method::GET, url.clone(), None)).await
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> EsResult<Value> {
        let path = url.path().to_string();
        tracing::debug!(method = %method, path = %path, "Sending request");

        let mut request = self.http.request(method, url);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| EsError::Transport {
            path: path.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| EsError::Transport {
            path: path.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(EsError::Status {
                status: status.as_u16(),
                reason: error_reason(status, &text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| EsError::Decode {
            path,
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsClient")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.credentials.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
