// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote adapter abstraction.
//!
//! Provides a trait-based remote layer that enables:
//! - Real HTTP calls for production ([`HttpRemote`])
//! - Scripted remotes for unit testing
//!
//! An adapter translates one [`RemoteRequest`] into one call. It never
//! retries; retry policy belongs to the processor.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

/// Error type for remote calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote could not be reached at all (connect failure, timeout,
    /// dropped connection).
    #[error("remote unreachable: {0}")]
    Unreachable(String),

    /// The remote answered with a non-success status.
    #[error("remote rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The remote answered 2xx with a body that is not JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot be used.
    #[error("invalid remote url '{0}'")]
    InvalidUrl(String),
}

impl RemoteError {
    /// True for failures that say nothing about the request itself, only
    /// that the remote is out of reach.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RemoteError::Unreachable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Rejected { status: 404, .. })
    }

    /// True if the remote answered 2xx, so the request took effect even
    /// though the body could not be read.
    pub fn was_accepted(&self) -> bool {
        matches!(self, RemoteError::InvalidResponse(_))
    }
}

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`Remote::call`].
pub type RemoteFuture<'a> = Pin<Box<dyn Future<Output = RemoteResult<Value>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// One call to the remote: a method, a path relative to the base URL, and an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    /// Path segments, unescaped.
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl RemoteRequest {
    pub fn get<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self::new(Method::Get, segments, None)
    }

    pub fn post<S: Into<String>>(segments: impl IntoIterator<Item = S>, body: Value) -> Self {
        Self::new(Method::Post, segments, Some(body))
    }

    pub fn delete<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self::new(Method::Delete, segments, None)
    }

    fn new<S: Into<String>>(
        method: Method,
        segments: impl IntoIterator<Item = S>,
        body: Option<Value>,
    ) -> Self {
        RemoteRequest {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body,
        }
    }

    /// The request path, e.g. `/games/g1/sync`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for RemoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

/// Remote adapter trait.
///
/// This trait abstracts over the actual remote service, allowing for easy
/// testing with mock implementations.
pub trait Remote: Send + Sync {
    /// Performs one call and returns the decoded JSON body (`Null` if empty).
    fn call(&self, request: RemoteRequest) -> RemoteFuture<'_>;
}

/// HTTP remote on `reqwest` with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: Url,
}

impl HttpRemote {
    pub fn new(base_url: &str, timeout: Duration) -> RemoteResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| RemoteError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;
        Ok(HttpRemote { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn url_for(&self, request: &RemoteRequest) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    async fn send(&self, request: RemoteRequest) -> RemoteResult<Value> {
        let url = self.url_for(&request)?;
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body, status.canonical_reason()),
            });
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

impl Remote for HttpRemote {
    fn call(&self, request: RemoteRequest) -> RemoteFuture<'_> {
        Box::pin(self.send(request))
    }
}

/// Extracts a human-readable message from an error body: the JSON `detail`
/// field when present, else the raw text, else the status reason.
pub fn error_detail(body: &[u8], reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(detail) if !detail.is_null() => return detail.to_string(),
            _ => {}
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    reason.unwrap_or("request failed").to_string()
}
