//! Healthprobe - container HTTP healthcheck probe.
//!
//! Issues a single GET request against a configurable local endpoint,
//! classifies the status code and optional JSON body, and maps the outcome
//! to a process exit code for the container orchestrator.

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod shutdown;
