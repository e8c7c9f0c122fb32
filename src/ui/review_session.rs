use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use crate::enums::review_state::ReviewState;
use crate::errors::analysis_error::{AnalysisError, AnalysisOutcome};
use crate::services::code_reviewer::CodeReviewer;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an analysis is already in flight")]
    AlreadyInFlight,
    #[error("submission #{0} is not the outstanding request")]
    StaleSubmission(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Handed out by [`ReviewSession::begin`]; only its holder can resolve the
/// outstanding request. Not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct Submission {
    id: u64,
}

/// Owner of the single current-result slot.
#[derive(Debug, Default)]
pub struct ReviewSession {
    state: ReviewState,
    last_submission: u64,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, ReviewState::InFlight)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ReviewState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Result<Submission, SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::AlreadyInFlight);
        }

        self.last_submission += 1;
        self.state = ReviewState::InFlight;
        log::debug!("🚦 Submission #{} in flight", self.last_submission);

        Ok(Submission { id: self.last_submission })
    }

    /// Replaces the slot wholesale with the outcome of the outstanding request.
    pub fn resolve(&mut self, submission: Submission, outcome: AnalysisOutcome<AnalysisResult>) -> Result<&ReviewState, SessionError> {
        if !self.is_in_flight() || submission.id != self.last_submission {
            return Err(SessionError::StaleSubmission(submission.id));
        }

        self.state = match outcome {
            Ok(result) => ReviewState::Succeeded(result),
            Err(error) => ReviewState::Failed(error),
        };
        log::debug!("🏁 Submission #{} resolved", submission.id);

        Ok(&self.state)
    }
}

/// [`ReviewSession`] shared between the async tasks of the CLI or server.
#[derive(Debug, Clone, Default)]
pub struct SharedReviewSession {
    inner: Arc<Mutex<ReviewSession>>,
}

impl SharedReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReviewSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ReviewState {
        self.lock().state().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().is_in_flight()
    }

    /// Runs one analysis through the single-flight gate. Blank input is
    /// rejected before the gate opens and leaves the state untouched; a
    /// submission while another is outstanding is rejected, never queued.
    pub async fn submit(&self, reviewer: &CodeReviewer, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        if request.is_blank() {
            return Err(SubmitError::Analysis(AnalysisError::EmptyInput));
        }

        let guard = self.begin()?;
        let outcome = reviewer.review(request).await;
        guard.finish(outcome.clone());

        outcome.map_err(SubmitError::Analysis)
    }

    pub fn begin(&self) -> Result<InFlightGuard, SessionError> {
        let submission = self.lock().begin()?;
        Ok(InFlightGuard {
            session: self.clone(),
            submission: Some(submission),
        })
    }
}

/// Clears the in-flight flag on every exit path. Dropping it unresolved (the
/// awaiting future was cancelled) records a network failure.
#[derive(Debug)]
pub struct InFlightGuard {
    session: SharedReviewSession,
    submission: Option<Submission>,
}

impl InFlightGuard {
    pub fn finish(mut self, outcome: AnalysisOutcome<AnalysisResult>) {
        self.resolve(outcome);
    }

    fn resolve(&mut self, outcome: AnalysisOutcome<AnalysisResult>) {
        if let Some(submission) = self.submission.take() {
            if let Err(e) = self.session.lock().resolve(submission, outcome) {
                log::warn!("⚠️ Dropping outcome: {}", e);
            }
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.submission.is_some() {
            log::warn!("⚠️ Analysis abandoned before completion");
            self.resolve(Err(AnalysisError::network("analysis cancelled", None)));
        }
    }
}
