//! HTTP access to the ordering REST API.
//!
//! [`ApiClient`] builds URLs from the configured base, injects the bearer
//! token of the [`Session`] it is handed, and turns non-2xx responses into
//! [`ApiError`]s. The endpoint wrappers live in the submodules.

pub mod auth;
pub mod orders;
pub mod projects;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    error::{ApiError, AppError, Result},
    services::session::Session,
};

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, or a body that could not be decoded.
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    /// Deserialize a JSON body into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Text(text) => Ok(serde_json::from_str(&text)?),
            Payload::Empty => Err(AppError::Internal(
                "Expected a JSON body but the response was empty".to_string(),
            )),
        }
    }
}

/// A single call against the API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }

    /// Send `request`, authenticated as `session` when it holds a token.
    pub async fn send(&self, session: &Session, request: ApiRequest) -> Result<Payload> {
        let url = self.url_for(&request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(token) = session.bearer() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, url = %url, "Sending API request");

        let response = builder.send().await?;
        let status = response.status();
        let payload = decode_body(response).await;

        if !status.is_success() {
            let err = ApiError::new(status, payload);
            tracing::warn!(
                method = %request.method,
                url = %url,
                status = err.status,
                message = %err.message,
                "API request failed"
            );
            return Err(err.into());
        }

        Ok(payload)
    }

    /// Send `request` and deserialize the JSON body into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: ApiRequest,
    ) -> Result<T> {
        self.send(session, request).await?.into_json()
    }
}

async fn decode_body(response: reqwest::Response) -> Payload {
    if response.status() == StatusCode::NO_CONTENT {
        return Payload::Empty;
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    if is_json {
        response
            .json::<Value>()
            .await
            .map(Payload::Json)
            .unwrap_or(Payload::Empty)
    } else {
        response
            .text()
            .await
            .map(Payload::Text)
            .unwrap_or(Payload::Empty)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

fn normalize_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
