use bytes::Bytes;
use serde::Deserialize;

/// MIME type attached to the uploaded resume part.
pub const PDF_MIME: &str = "application/pdf";

/// A locally selected resume. Replaced wholesale on each selection, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Fit assessment returned by the analysis service. Extra response fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub binary_classification: String,
    pub job_role: String,
    /// Percentage value; displayed with a trailing `%`.
    pub match_score: f64,
}

/// Stage of the submission lifecycle. No phase is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything the submission view renders from.
///
/// Invariants held by the controller:
/// - `result` and `error_message` are never both present.
/// - `result` is present only in `Phase::Succeeded`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    pub resume_file: Option<ResumeFile>,
    /// Stored exactly as typed; trimming only applies to the submit precondition.
    pub job_description: String,
    pub phase: Phase,
    pub result: Option<AnalysisResult>,
    pub error_message: Option<String>,
}

impl SubmissionState {
    /// Whether `submit` would pass local validation right now.
    pub fn is_ready(&self) -> bool {
        self.resume_file.is_some() && !self.job_description.trim().is_empty()
    }
}
