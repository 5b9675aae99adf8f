//! HTTP probe execution.
//!
//! Issues exactly one GET request against the configured endpoint and maps
//! transport failures into the probe error taxonomy. No retries; each
//! invocation is an independent check, and retry policy belongs to the
//! orchestrator that schedules the probe.

use http::{header, HeaderMap, StatusCode};
use reqwest::Client;

use crate::config::{ProbeConfig, USER_AGENT};
use crate::error::ProbeError;

/// A fully received HTTP response, before classification
#[derive(Debug)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Build the HTTP client used for the probe request.
///
/// The timeout bounds the whole request, connection establishment through
/// body read; when it fires the client aborts the underlying connection.
pub fn build_client(config: &ProbeConfig) -> Result<Client, ProbeError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .build()
        .map_err(ProbeError::Client)
}

/// Perform the single GET request against the configured endpoint.
///
/// Resolves with the response for ANY received status code; deciding whether
/// a status is healthy is the classifier's job. Fails with `Timeout` or
/// `Network` when no complete response arrives.
pub async fn run(client: &Client, config: &ProbeConfig) -> Result<ProbeResponse, ProbeError> {
    let url = config.url();
    tracing::debug!(%url, timeout_ms = config.timeout_ms, "sending probe request");

    let response = client
        .get(&url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ProbeError::from_transport(e, config.timeout_ms))?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|e| ProbeError::from_transport(e, config.timeout_ms))?;

    tracing::debug!(
        status = status.as_u16(),
        bytes = body.len(),
        content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        "probe response received"
    );

    Ok(ProbeResponse {
        status,
        headers,
        body,
    })
}
