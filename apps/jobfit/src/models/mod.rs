pub mod submission;

pub use submission::{AnalysisResult, Phase, ResumeFile, SubmissionState, PDF_MIME};
