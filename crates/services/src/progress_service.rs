use std::sync::Arc;
use tracing::debug;

use client::StudentApi;
use lms_core::progress::{self, CompletionCheck, ProgressView};
use lms_core::{Chapter, ChapterId, Course, CourseId};

use crate::error::ProgressServiceError;

//
// ─── COURSE VIEW ───────────────────────────────────────────────────────────────
//

/// A course's chapter list together with its derived traversal view.
///
/// `chapters` is the raw server payload the view was derived from; callers
/// pass it back into `request_completion` so the preflight runs against the
/// same data the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    pub course_id: CourseId,
    pub chapters: Vec<Chapter>,
    pub view: ProgressView,
}

//
// ─── PROGRESS SERVICE ──────────────────────────────────────────────────────────
//

/// Orchestrates the fetch-derive-complete workflow over the remote API.
///
/// The service holds no per-course state; every computation treats the
/// supplied chapter list as the authoritative input, so an administrative
/// reset on the server simply shows up as a fresh list on the next fetch.
#[derive(Clone)]
pub struct ProgressService {
    api: Arc<dyn StudentApi>,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        Self { api }
    }

    /// List the courses the student is enrolled in.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` on transport failures.
    pub async fn list_courses(&self) -> Result<Vec<Course>, ProgressServiceError> {
        Ok(self.api.fetch_courses().await?)
    }

    /// Fetch the latest chapter list for a course and derive its view.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Api` on transport failures.
    pub async fn load_course_view(
        &self,
        course_id: &CourseId,
    ) -> Result<CourseView, ProgressServiceError> {
        let chapters = self.api.fetch_chapters(course_id).await?;
        let view = progress::compute_view(&chapters);
        Ok(CourseView {
            course_id: course_id.clone(),
            chapters,
            view,
        })
    }

    /// Request completion of a chapter against the supplied chapter list.
    ///
    /// Runs the preflight locally first: a locked or unknown chapter fails
    /// without any network round trip, and an already-completed chapter is a
    /// no-op success. When the preflight passes, the remote mark-complete is
    /// invoked exactly once; on success the returned view is an optimistic
    /// local projection and callers should re-fetch for the authoritative
    /// state. Callers are responsible for not issuing concurrent requests for
    /// the same chapter (e.g. by disabling the triggering control while one
    /// is pending).
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for locked or unknown
    /// chapters, or `ProgressServiceError::RemoteRejected` when the remote
    /// call fails; the local state is never partially mutated.
    pub async fn request_completion(
        &self,
        chapter_id: &ChapterId,
        chapters: &[Chapter],
    ) -> Result<ProgressView, ProgressServiceError> {
        match progress::check_completion(chapter_id, chapters)? {
            CompletionCheck::AlreadyCompleted => {
                debug!(%chapter_id, "chapter already complete; skipping remote call");
                Ok(progress::compute_view(chapters))
            }
            CompletionCheck::ReadyToComplete => {
                self.api
                    .mark_chapter_complete(chapter_id)
                    .await
                    .map_err(ProgressServiceError::RemoteRejected)?;
                debug!(%chapter_id, "chapter completion recorded remotely");
                Ok(progress::with_chapter_completed(chapters, chapter_id))
            }
        }
    }
}
