//! Analysis Service: the remote endpoint that scores a resume against a job description.
//!
//! The controller only sees the `AnalysisService` trait, so the HTTP transport
//! can be swapped for an in-memory fake without touching submission logic.

use async_trait::async_trait;

use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, ResumeFile};

pub mod http;

pub use http::HttpAnalysisClient;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying the raw job description.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// One outbound analysis request, captured at the moment of submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub resume: ResumeFile,
    /// Sent untrimmed.
    pub job_description: String,
}

/// One request, one response. Implementations must not retry.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
