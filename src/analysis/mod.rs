//! Analysis results returned by the reserving service and the per-submission
//! outcome

mod result;
mod outcome;

pub use result::{DevelopmentFactor, MackEstimate, TriangleAnalysisResult};
pub use outcome::AnalysisOutcome;
