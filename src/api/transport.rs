//! Transport seam between the API client and the network.
//!
//! # Responsibilities
//! - Describe an outgoing request (`ApiRequest`) and a completed exchange
//!   (`RawResponse`)
//! - Report failures as `TransportError`, with the response attached when
//!   one was received
//! - Provide the reqwest-backed `HttpTransport`
//!
//! # Design Decisions
//! - A completed exchange is `Ok` whatever its status code, unless the
//!   transport is told to reject non-2xx responses
//! - Bodies are decoded once: JSON when it parses, raw text otherwise,
//!   `None` when empty

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// An outgoing request, relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path joined onto the base URL, or an absolute URL.
    pub path: String,
    pub headers: HeaderMap,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A completed upstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, empty when unknown.
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            status_text,
            headers: HeaderMap::new(),
            body,
        }
    }
}

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete in time.
    Timeout,
    /// No connection could be established (refused, DNS).
    Connect,
    /// The request could not be built or sent.
    Request,
    /// Headers arrived but the body transfer was cut short.
    Body,
    /// The upstream answered with a rejected status code.
    Status,
}

/// A failed exchange, optionally carrying the response that was received.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    pub response: Option<RawResponse>,
}

impl TransportError {
    pub fn no_response(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            response: None,
        }
    }

    pub fn with_response(
        kind: TransportErrorKind,
        message: impl Into<String>,
        response: RawResponse,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            response: Some(response),
        }
    }

    fn from_reqwest(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Request
        };
        Self::no_response(kind, error.to_string())
    }
}

/// Performs the actual HTTP exchange.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Error building an `HttpTransport`.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    #[error("invalid base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    reject_error_status: bool,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportBuildError> {
        url::Url::parse(base_url).map_err(|source| TransportBuildError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            reject_error_status: false,
        })
    }

    /// Treat non-2xx responses as failures carrying the response.
    pub fn reject_error_status(mut self, reject: bool) -> Self {
        self.reject_error_status = reject;
        self
    }

    /// Join a request path onto the base URL; absolute URLs pass through.
    pub fn resolve_url(&self, path: &str) -> Result<url::Url, url::ParseError> {
        if let Ok(absolute) = url::Url::parse(path) {
            return Ok(absolute);
        }
        if path.is_empty() {
            return url::Url::parse(&self.base_url);
        }
        url::Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.resolve_url(&request.path).map_err(|e| {
            TransportError::no_response(
                TransportErrorKind::Request,
                format!("invalid request URL '{}': {}", request.path, e),
            )
        })?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(TransportError::from_reqwest)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response.headers().clone();

        // A body cut short (timeout, reset) is an aborted exchange, not a reply
        let bytes = response.bytes().await.map_err(|e| {
            let kind = if e.is_timeout() {
                TransportErrorKind::Timeout
            } else {
                TransportErrorKind::Body
            };
            TransportError::no_response(kind, e.to_string())
        })?;

        let raw = RawResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body: decode_body(&bytes),
        };

        if self.reject_error_status && !status.is_success() {
            return Err(TransportError::with_response(
                TransportErrorKind::Status,
                format!("Request failed with status code {}", status.as_u16()),
                raw,
            ));
        }

        Ok(raw)
    }
}

/// JSON when it parses, raw text otherwise, `None` when empty.
pub fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}
