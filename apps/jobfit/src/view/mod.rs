//! Submission view: a pure projection of `SubmissionState`.
//!
//! Nothing here holds state of its own; renderers receive a `ViewModel`
//! built fresh from each snapshot.

use crate::models::{AnalysisResult, Phase, SubmissionState};

pub mod reveal;
pub mod terminal;

pub const SUBMIT_LABEL: &str = "Analyze Job Fit";
pub const SUBMITTING_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// `(file name, size in bytes)` of the selected resume.
    pub resume: Option<(String, usize)>,
    pub description_chars: usize,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub results: Option<ResultsView>,
}

/// The results region, fields rendered verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub classification: String,
    pub job_role: String,
    pub match_score: String,
}

impl From<&AnalysisResult> for ResultsView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            classification: result.binary_classification.clone(),
            job_role: result.job_role.clone(),
            match_score: format!("{}%", result.match_score),
        }
    }
}

pub fn project(state: &SubmissionState) -> ViewModel {
    let submitting = state.phase == Phase::Submitting;

    let results = match (&state.result, state.phase) {
        (Some(result), Phase::Succeeded) => Some(ResultsView::from(result)),
        _ => None,
    };

    ViewModel {
        resume: state
            .resume_file
            .as_ref()
            .map(|f| (f.file_name.clone(), f.size())),
        description_chars: state.job_description.chars().count(),
        submit_enabled: !submitting,
        submit_label: if submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        },
        error: state.error_message.clone(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeFile;

    fn fit_result() -> AnalysisResult {
        AnalysisResult {
            binary_classification: "Fit".to_string(),
            job_role: "Backend Engineer".to_string(),
            match_score: 87.0,
        }
    }

    #[test]
    fn test_submit_disabled_only_while_submitting() {
        for phase in [Phase::Idle, Phase::Succeeded, Phase::Failed] {
            let view = project(&SubmissionState {
                phase,
                ..Default::default()
            });
            assert!(view.submit_enabled);
            assert_eq!(view.submit_label, SUBMIT_LABEL);
        }

        let view = project(&SubmissionState {
            phase: Phase::Submitting,
            ..Default::default()
        });
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, "Analyzing...");
    }

    #[test]
    fn test_results_render_verbatim_with_percent() {
        let view = project(&SubmissionState {
            phase: Phase::Succeeded,
            result: Some(fit_result()),
            ..Default::default()
        });

        assert_eq!(
            view.results,
            Some(ResultsView {
                classification: "Fit".to_string(),
                job_role: "Backend Engineer".to_string(),
                match_score: "87%".to_string(),
            })
        );
        assert!(view.error.is_none());
    }

    #[test]
    fn test_fractional_score_keeps_decimals() {
        let mut result = fit_result();
        result.match_score = 62.5;
        assert_eq!(ResultsView::from(&result).match_score, "62.5%");
    }

    #[test]
    fn test_results_hidden_outside_succeeded() {
        let view = project(&SubmissionState {
            phase: Phase::Idle,
            result: Some(fit_result()),
            ..Default::default()
        });
        assert!(view.results.is_none());
    }

    #[test]
    fn test_error_region_follows_message() {
        let view = project(&SubmissionState {
            phase: Phase::Failed,
            error_message: Some("Server error".to_string()),
            ..Default::default()
        });
        assert_eq!(view.error.as_deref(), Some("Server error"));
        assert!(view.results.is_none());

        assert!(project(&SubmissionState::default()).error.is_none());
    }

    #[test]
    fn test_inputs_summarized() {
        let view = project(&SubmissionState {
            resume_file: Some(ResumeFile::new("cv.pdf", vec![0u8; 2048])),
            job_description: "Rust, café".to_string(),
            ..Default::default()
        });
        assert_eq!(view.resume, Some(("cv.pdf".to_string(), 2048)));
        assert_eq!(view.description_chars, 10);
    }
}
