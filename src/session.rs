//! Single-slot orchestration of analysis submissions
//!
//! A session owns exactly one outcome slot. Starting a submission overwrites
//! the slot with `Pending` (the previous result is discarded, never merged),
//! and the slot is overwritten again when the service call resolves.
//! `submit` borrows the session mutably for the whole call, so a second
//! submission cannot start while one is in flight.

use crate::analysis::AnalysisOutcome;
use crate::display::{DisplayModel, ResultProjector};
use crate::request::{build, FormValues, TriangleFile, TriangleUploadRequest};
use crate::transport::AnalysisService;

/// Interactive analysis session over one service
///
/// # Example
/// ```ignore
/// let client = ReservingClient::new(ClientConfig::default())?;
/// let mut session = AnalysisSession::new(client);
///
/// session.analyze(Some(file), &FormValues::default()).await;
/// println!("{:?}", session.display());
/// ```
pub struct AnalysisSession<S> {
    service: S,
    projector: ResultProjector,
    /// None while idle
    slot: Option<AnalysisOutcome>,
}

impl<S: AnalysisService> AnalysisSession<S> {
    pub fn new(service: S) -> Self {
        Self::with_projector(service, ResultProjector::default())
    }

    pub fn with_projector(service: S, projector: ResultProjector) -> Self {
        Self {
            service,
            projector,
            slot: None,
        }
    }

    /// Validate the user's input and, if sendable, submit it.
    ///
    /// Validation failures end the submission as `Failed` without any
    /// network call.
    pub async fn analyze(&mut self, file: Option<TriangleFile>, form: &FormValues) -> &AnalysisOutcome {
        match build(file, form) {
            Ok(request) => self.submit(request).await,
            Err(e) => {
                log::warn!("Submission rejected before sending: {}", e);
                self.slot.insert(AnalysisOutcome::failed(e.to_string()))
            }
        }
    }

    /// Submit a built request and wait for its outcome
    pub async fn submit(&mut self, request: TriangleUploadRequest) -> &AnalysisOutcome {
        self.begin();
        let outcome = self.service.submit(request).await;
        self.slot.insert(outcome)
    }

    /// Enter `Pending`, discarding whatever the slot held
    pub fn begin(&mut self) {
        self.slot = Some(AnalysisOutcome::Pending);
    }

    /// Current outcome; None before the first submission
    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.slot.as_ref()
    }

    /// A new submission may only start when nothing is in flight
    pub fn can_submit(&self) -> bool {
        !matches!(self.slot, Some(AnalysisOutcome::Pending))
    }

    /// Display model for the current slot
    pub fn display(&self) -> DisplayModel {
        match &self.slot {
            None => DisplayModel::Idle,
            Some(outcome) => self.projector.project(outcome),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
