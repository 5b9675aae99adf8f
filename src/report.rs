//! Response classification and diagnostic output.
//!
//! A 2xx status is healthy regardless of body content; the body is decoded as
//! JSON on a best-effort basis and surfaced when it carries the optional
//! `status` and `uptime` fields. Any other status is unhealthy and the body
//! is echoed verbatim. All diagnostic lines are prefixed `[HEALTHCHECK]`:
//! informational lines go to stdout, error lines to stderr.

use serde::Deserialize;

use crate::error::{NetworkCause, ProbeError};
use crate::probe::ProbeResponse;

/// Process exit code for a healthy target (or shutdown via signal)
pub const EXIT_HEALTHY: i32 = 0;

/// Process exit code for an unhealthy target, for any reason
pub const EXIT_UNHEALTHY: i32 = 1;

/// Optional health payload reported by the endpoint.
///
/// Decoding is best-effort: absence of the body, a non-JSON body, or an
/// unexpected shape all yield `None` upstream and are not failures.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HealthData {
    pub status: Option<String>,
    pub uptime: Option<f64>,
}

/// A classified healthy response
#[derive(Debug)]
pub struct HealthReport {
    pub status: http::StatusCode,
    pub data: Option<HealthData>,
}

/// Best-effort decode of the response body.
pub fn parse_health_data(body: &str) -> Option<HealthData> {
    match serde_json::from_str(body) {
        Ok(data) => Some(data),
        Err(err) => {
            tracing::debug!(error = %err, "response body is not health JSON");
            None
        }
    }
}

/// Classify a received response.
///
/// Status in [200, 300) is healthy; anything else becomes `BadStatus`
/// carrying the verbatim body for diagnostics.
pub fn classify(response: ProbeResponse) -> Result<HealthReport, ProbeError> {
    if response.status.is_success() {
        Ok(HealthReport {
            status: response.status,
            data: parse_health_data(&response.body),
        })
    } else {
        Err(ProbeError::BadStatus {
            status: response.status,
            body: response.body,
        })
    }
}

/// Map a classification outcome to the process exit code.
pub fn exit_code(outcome: &Result<HealthReport, ProbeError>) -> i32 {
    match outcome {
        Ok(_) => EXIT_HEALTHY,
        Err(_) => EXIT_UNHEALTHY,
    }
}

/// Print the healthy-path diagnostic lines to stdout.
pub fn print_report(report: &HealthReport) {
    if report.data.is_none() {
        println!("[HEALTHCHECK] Non-JSON response received, but status OK");
    }

    println!("[HEALTHCHECK] ✅ Application healthy");
    println!("[HEALTHCHECK] Status: {}", report.status.as_u16());

    if let Some(data) = &report.data {
        if let Some(status) = &data.status {
            println!("[HEALTHCHECK] Reported status: {status}");
        }
        if let Some(uptime) = data.uptime {
            println!("[HEALTHCHECK] Uptime: {uptime}s");
        }
    }
}

/// Print the unhealthy-path diagnostic lines to stderr.
pub fn print_error(err: &ProbeError) {
    match err {
        ProbeError::BadStatus { status, body } => {
            eprintln!("[HEALTHCHECK] ❌ Invalid HTTP status: {}", status.as_u16());
            eprintln!("[HEALTHCHECK] Response body: {body}");
        }
        other => {
            eprintln!("[HEALTHCHECK] ❌ Healthcheck failed: {other}");
            match other {
                ProbeError::Network {
                    cause: NetworkCause::Refused,
                    ..
                } => {
                    eprintln!("[HEALTHCHECK] Application not available (connection refused)");
                }
                ProbeError::Network {
                    cause: NetworkCause::HostNotFound,
                    ..
                } => {
                    eprintln!("[HEALTHCHECK] Host not found");
                }
                ProbeError::Timeout { .. } => {
                    eprintln!("[HEALTHCHECK] Request timed out");
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};

    fn response(status: u16, body: &str) -> ProbeResponse {
        ProbeResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn parses_status_and_uptime() {
        let data = parse_health_data(r#"{"status":"ok","uptime":42}"#).unwrap();
        assert_eq!(data.status.as_deref(), Some("ok"));
        assert_eq!(data.uptime, Some(42.0));
    }

    #[test]
    fn tolerates_missing_fields() {
        let data = parse_health_data(r#"{"version":"1.2.3"}"#).unwrap();
        assert_eq!(data, HealthData::default());
    }

    #[test]
    fn non_json_body_yields_none() {
        assert_eq!(parse_health_data("it lives"), None);
        assert_eq!(parse_health_data(""), None);
    }

    #[test]
    fn success_statuses_are_healthy_regardless_of_body() {
        for status in [200, 204, 299] {
            for body in ["", "plain text", r#"{"status":"ok"}"#] {
                let report = classify(response(status, body)).unwrap();
                assert_eq!(report.status.as_u16(), status);
            }
        }
    }

    #[test]
    fn healthy_report_carries_decoded_data() {
        let report = classify(response(200, r#"{"status":"degraded","uptime":7.5}"#)).unwrap();
        let data = report.data.unwrap();
        assert_eq!(data.status.as_deref(), Some("degraded"));
        assert_eq!(data.uptime, Some(7.5));
    }

    #[test]
    fn non_success_statuses_are_bad_status_with_verbatim_body() {
        for status in [300, 301, 404, 500, 503] {
            match classify(response(status, "service down")) {
                Err(ProbeError::BadStatus {
                    status: got, body, ..
                }) => {
                    assert_eq!(got.as_u16(), status);
                    assert_eq!(body, "service down");
                }
                other => panic!("expected BadStatus for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn exit_codes_map_outcomes() {
        let healthy = classify(response(200, ""));
        assert_eq!(exit_code(&healthy), EXIT_HEALTHY);

        let unhealthy = classify(response(500, ""));
        assert_eq!(exit_code(&unhealthy), EXIT_UNHEALTHY);

        let timeout: Result<HealthReport, ProbeError> =
            Err(ProbeError::Timeout { timeout_ms: 3000 });
        assert_eq!(exit_code(&timeout), EXIT_UNHEALTHY);
    }
}
