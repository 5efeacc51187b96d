use std::sync::Arc;

use client::{CertificateIssued, StudentApi};
use lms_core::progress::{certificate_eligible, CourseProgress};
use lms_core::CourseId;

use crate::error::CertificateError;

/// Certificate affordance for completed courses.
///
/// Eligibility is the engine's predicate, so the download button can never
/// disagree with the progress derivation; the download itself is always
/// re-validated by the server.
#[derive(Clone)]
pub struct CertificateService {
    api: Arc<dyn StudentApi>,
}

impl CertificateService {
    #[must_use]
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        Self { api }
    }

    /// Whether the certificate affordance should be offered at all.
    #[must_use]
    pub fn eligible(&self, progress: &CourseProgress) -> bool {
        certificate_eligible(progress)
    }

    /// Request the certificate from the server.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Api` when the server refuses, including
    /// when it considers the course incomplete regardless of the local view.
    pub async fn request_certificate(
        &self,
        course_id: &CourseId,
    ) -> Result<CertificateIssued, CertificateError> {
        Ok(self.api.request_certificate(course_id).await?)
    }
}
