use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use lms_core::{Chapter, ChapterId, Course, CourseId};

/// Errors surfaced by API adapters.
///
/// Consumers that only need "the remote refused" can match the whole enum;
/// the variants exist so boundary code can offer a re-login or re-fetch hint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not authenticated or token expired")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("server rejected the request ({status}): {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Server-computed progress summary for a course.
///
/// Display-only: the client derives its own authoritative view from the
/// chapter list, but course lists and mentor dashboards show these numbers
/// without fetching every chapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProgress {
    pub total_chapters: u32,
    pub completed_chapters: u32,
    pub progress_percentage: u8,
    #[serde(default)]
    pub chapters: Vec<RemoteChapterProgress>,
}

/// Per-chapter completion entry in the server progress report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteChapterProgress {
    pub id: ChapterId,
    pub title: String,
    pub sequence_order: u32,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// A certificate issued (or re-issued) by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CertificateIssued {
    pub certificate_url: String,
    #[serde(default)]
    pub message: String,
}

/// Student-facing API surface the progress engine collaborates with.
///
/// `fetch_chapters` is the inbound source of truth; `mark_chapter_complete`
/// is the outbound mark-remote capability. Everything else is display data.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// List the courses the student is enrolled in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError>;

    /// Fetch the latest server-known chapter list for a course.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown course, or other API errors.
    async fn fetch_chapters(&self, course_id: &CourseId) -> Result<Vec<Chapter>, ApiError>;

    /// Fetch the server-computed progress summary for a course.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown course, or other API errors.
    async fn fetch_progress(&self, course_id: &CourseId) -> Result<RemoteProgress, ApiError>;

    /// Record a chapter completion on the server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the server refuses; the caller decides whether
    /// and when to retry.
    async fn mark_chapter_complete(&self, chapter_id: &ChapterId) -> Result<(), ApiError>;

    /// Request the course certificate. The server re-validates completion.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the server refuses, including when it considers
    /// the course incomplete.
    async fn request_certificate(&self, course_id: &CourseId)
        -> Result<CertificateIssued, ApiError>;
}
