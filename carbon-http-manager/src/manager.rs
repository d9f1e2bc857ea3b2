use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{HttpError, HttpHeader, HttpRequest, HttpResponse, HttpResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: concat!("carbon/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Executes [`HttpRequest`]s with reqwest. Every failure comes back as an
/// [`HttpError`]; non-2xx statuses are returned as ordinary responses.
#[derive(Clone, Debug)]
pub struct HttpManager {
    client: Client,
    config: HttpConfig,
}

impl HttpManager {
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| HttpError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub async fn execute(&self, request: HttpRequest) -> HttpResult {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::InvalidRequest(format!("method `{}`", request.method)))?;
        let mut builder = self.client.request(method, &request.url);
        for HttpHeader { name, value } in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::InvalidRequest(format!("header name `{name}`")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidRequest(format!("header value for `{name}`")))?;
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "http request");
        let response = builder.send().await.map_err(|err| self.classify(err))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                Some(HttpHeader {
                    name: name.as_str().to_string(),
                    value: value.to_str().ok()?.to_string(),
                })
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|err| HttpError::Body(err.to_string()))?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), url = %request.url, "http response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn classify(&self, err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(self.config.timeout_ms)
        } else if err.is_builder() {
            HttpError::InvalidRequest(err.to_string())
        } else {
            HttpError::Transport(err.to_string())
        }
    }
}
