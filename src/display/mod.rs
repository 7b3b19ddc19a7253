//! Result projection: turns an `AnalysisOutcome` into something a rendering
//! surface can show without reinterpreting it
//!
//! - Absent estimates render as an explicit `N/A`, never as zero
//! - Mack MSE appears only next to a Mack ultimate
//! - Development factors keep the service's order, four decimals each
//! - An empty factor list produces no table at all

mod format;
mod model;
mod projector;

pub use format::{NumberFormat, FACTOR_DECIMALS, NOT_AVAILABLE};
pub use model::{DisplayModel, DisplayValue, DuplicateFactor, FactorRow, FactorTable, ResultsView};
pub use projector::{project, ResultProjector};
