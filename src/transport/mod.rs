//! Transport to the reserving service
//!
//! Sends a normalized request as a multipart upload, awaits exactly one
//! response and classifies it:
//! - **Success**: body parsed into a `TriangleAnalysisResult`
//! - **Service failure**: non-success status, body kept as diagnostic text
//! - **Transport failure**: unreachable endpoint, timeout, malformed body
//!
//! Every failure is local to one submission and is never retried here.

mod config;
mod error;
mod client;

pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::TransportError;
pub use client::{encode_form, HealthStatus, ReservingClient, ANALYZE_PATH, HEALTH_PATH};

use crate::analysis::AnalysisOutcome;
use crate::request::TriangleUploadRequest;
use async_trait::async_trait;

/// Seam between the orchestration layer and the analysis service.
///
/// Implement this trait to plug in another transport (or a test double).
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one request and resolve to its outcome. Completes exactly once
    /// and never yields `Pending`.
    async fn submit(&self, request: TriangleUploadRequest) -> AnalysisOutcome;

    /// Lightweight liveness probe, used for diagnostics only
    async fn check_health(&self) -> Result<HealthStatus, TransportError>;
}
