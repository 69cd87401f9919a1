use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Url};
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisRequest, AnalysisService, JOB_DESCRIPTION_FIELD, RESUME_FIELD};
use crate::errors::AnalysisError;
use crate::models::{AnalysisResult, PDF_MIME};

/// Multipart HTTP client for the analysis endpoint.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: Url,
}

impl HttpAnalysisClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let AnalysisRequest {
            resume,
            job_description,
        } = request;

        let length = resume.bytes.len() as u64;
        let resume_part = Part::stream_with_length(Body::from(resume.bytes), length)
            .file_name(resume.file_name)
            .mime_str(PDF_MIME)?;
        let form = Form::new()
            .part(RESUME_FIELD, resume_part)
            .text(JOB_DESCRIPTION_FIELD, job_description);

        info!("Calling analysis service: {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Analysis service returned {}", status);
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&body)?;

        debug!(
            "Analysis succeeded: classification={}, match_score={}",
            result.binary_classification, result.match_score
        );

        Ok(result)
    }
}
