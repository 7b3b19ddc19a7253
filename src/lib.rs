//! Reserving Client - submission and display core for the loss-triangle
//! reserving service
//!
//! This library provides:
//! - Request building with column defaults and a permissive cumulative flag
//! - Multipart transport to the analysis service with outcome classification
//! - Projection of analysis results into display-ready models
//! - A single-slot session tying the three together

pub mod request;
pub mod analysis;
pub mod transport;
pub mod display;
pub mod session;

// Re-export commonly used types
pub use request::{build, FormValues, TriangleFile, TriangleUploadRequest, ValidationError};
pub use analysis::{AnalysisOutcome, DevelopmentFactor, MackEstimate, TriangleAnalysisResult};
pub use transport::{AnalysisService, ClientConfig, HealthStatus, ReservingClient, TransportError};
pub use display::{project, DisplayModel, DisplayValue, NumberFormat, ResultProjector};
pub use session::AnalysisSession;
