//! Submission Controller: owns the submission state and every transition on it.
//!
//! State is published through a `watch` channel: transitions mutate it with
//! `send_modify`, and views re-render from the snapshots they receive.
//!
//! `submit` is also available as two halves, `begin_submit` and `settle`, so an
//! event loop can keep accepting edits while a request is in flight.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisRequest, AnalysisService};
use crate::errors::{AnalysisError, GENERIC_FAILURE};
use crate::models::{AnalysisResult, Phase, ResumeFile, SubmissionState};

/// Shown when `submit` is invoked without a file or with a blank description.
pub const VALIDATION_MESSAGE: &str = "Please upload resume and enter job description.";

/// A submission that has entered `Submitting` and is waiting for its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    /// Sequence number, for correlating log lines.
    pub id: u64,
    pub request: AnalysisRequest,
}

pub struct SubmissionController {
    store: watch::Sender<SubmissionState>,
    submissions: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        let (store, _) = watch::channel(SubmissionState::default());
        Self {
            store,
            submissions: 0,
        }
    }

    /// Receives a snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> SubmissionState {
        self.store.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.store.borrow().phase
    }

    /// Valid in any phase. Replaces the file and returns to a clean `Idle`.
    pub fn select_file(&mut self, file: ResumeFile) {
        info!("Resume selected: {} ({} bytes)", file.file_name, file.size());
        self.store.send_modify(|state| {
            state.resume_file = Some(file);
            state.result = None;
            state.error_message = None;
            state.phase = Phase::Idle;
        });
    }

    /// Valid in any phase. Touches nothing but the description.
    pub fn edit_description(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.store.send_modify(|state| state.job_description = text);
    }

    /// Validates and, on success, enters `Submitting` and returns the request to send.
    ///
    /// The request is a snapshot: edits made while it is in flight do not reach it.
    /// Returns `None` after a validation failure, with the phase left unchanged.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        let snapshot = {
            let state = self.store.borrow();
            match (&state.resume_file, state.is_ready()) {
                (Some(file), true) => Some(AnalysisRequest {
                    resume: file.clone(),
                    job_description: state.job_description.clone(),
                }),
                _ => None,
            }
        };

        let Some(request) = snapshot else {
            debug!("Submission rejected: resume or job description missing");
            self.store.send_modify(|state| {
                state.result = None;
                state.error_message = Some(VALIDATION_MESSAGE.to_string());
            });
            return None;
        };

        self.submissions += 1;
        let id = self.submissions;
        info!(
            "Submission #{id} started ({} bytes resume, {} chars description)",
            request.resume.size(),
            request.job_description.chars().count()
        );

        self.store.send_modify(|state| {
            state.error_message = None;
            state.result = None;
            state.phase = Phase::Submitting;
        });

        Some(PendingSubmission { id, request })
    }

    /// Applies a request's outcome. Whichever submission settles last wins.
    pub fn settle(&mut self, id: u64, outcome: Result<AnalysisResult, AnalysisError>) {
        apply_outcome(&self.store, id, outcome);
    }

    /// Validates, sends one request through `service`, and applies its outcome.
    ///
    /// The phase never stays `Submitting` past this call, including when the
    /// returned future is dropped before the service answers.
    pub async fn submit(&mut self, service: &dyn AnalysisService) -> Phase {
        let Some(pending) = self.begin_submit() else {
            return self.phase();
        };

        let guard = SettleGuard {
            store: &self.store,
            id: pending.id,
            settled: false,
        };
        let outcome = service.analyze(pending.request).await;
        guard.settle(outcome);

        self.phase()
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_outcome(
    store: &watch::Sender<SubmissionState>,
    id: u64,
    outcome: Result<AnalysisResult, AnalysisError>,
) {
    match outcome {
        Ok(result) => {
            info!(
                "Submission #{id} succeeded: {} ({}%)",
                result.binary_classification, result.match_score
            );
            store.send_modify(|state| {
                state.result = Some(result);
                state.error_message = None;
                state.phase = Phase::Succeeded;
            });
        }
        Err(err) => {
            warn!("Submission #{id} failed: {err:?}");
            let message = err.user_message();
            store.send_modify(|state| {
                state.result = None;
                state.error_message = Some(message);
                state.phase = Phase::Failed;
            });
        }
    }
}

/// Settles a submission exactly once, failing it on drop if nobody else did.
struct SettleGuard<'a> {
    store: &'a watch::Sender<SubmissionState>,
    id: u64,
    settled: bool,
}

impl SettleGuard<'_> {
    fn settle(mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.settled = true;
        apply_outcome(self.store, self.id, outcome);
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("Submission #{} abandoned before settling", self.id);
        self.store.send_modify(|state| {
            if state.phase == Phase::Submitting {
                state.result = None;
                state.error_message = Some(GENERIC_FAILURE.to_string());
                state.phase = Phase::Failed;
            }
        });
    }
}
