use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lms_core::{Chapter, ChapterId, Course, CourseId};

use crate::api::{ApiError, CertificateIssued, RemoteProgress, StudentApi};

/// In-memory stand-in for the remote API, for tests and prototyping.
///
/// Mirrors the server contract closely enough for service-level tests:
/// marking a chapter complete flips its stored flag, progress is computed
/// from the stored chapters, and certificates are only issued for fully
/// completed courses. Each `mark_chapter_complete` call is counted per
/// chapter so tests can assert exactly-once and never-called behavior.
#[derive(Clone, Default)]
pub struct InMemoryStudentApi {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    courses: Vec<Course>,
    chapters: HashMap<CourseId, Vec<Chapter>>,
    mark_calls: HashMap<ChapterId, u32>,
    reject_marks: bool,
}

impl InMemoryStudentApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a course and its chapter list.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only type).
    pub fn seed_course(&self, course: Course, chapters: Vec<Chapter>) {
        let mut state = self.state.lock().expect("fake state lock");
        state.chapters.insert(course.id.clone(), chapters);
        state.courses.push(course);
    }

    /// When set, `mark_chapter_complete` fails without changing any state.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only type).
    pub fn reject_marks(&self, reject: bool) {
        self.state.lock().expect("fake state lock").reject_marks = reject;
    }

    /// Number of times `mark_chapter_complete` was invoked for a chapter.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test-only type).
    #[must_use]
    pub fn mark_calls(&self, chapter_id: &ChapterId) -> u32 {
        self.state
            .lock()
            .expect("fake state lock")
            .mark_calls
            .get(chapter_id)
            .copied()
            .unwrap_or(0)
    }
}

fn lock_err<T>(err: std::sync::PoisonError<T>) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[async_trait]
impl StudentApi for InMemoryStudentApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        let state = self.state.lock().map_err(lock_err)?;
        Ok(state.courses.clone())
    }

    async fn fetch_chapters(&self, course_id: &CourseId) -> Result<Vec<Chapter>, ApiError> {
        let state = self.state.lock().map_err(lock_err)?;
        state
            .chapters
            .get(course_id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn fetch_progress(&self, course_id: &CourseId) -> Result<RemoteProgress, ApiError> {
        let state = self.state.lock().map_err(lock_err)?;
        let chapters = state.chapters.get(course_id).ok_or(ApiError::NotFound)?;
        let total = u32::try_from(chapters.len()).unwrap_or(u32::MAX);
        let completed =
            u32::try_from(chapters.iter().filter(|c| c.is_completed).count()).unwrap_or(u32::MAX);
        let percentage = if total == 0 {
            0
        } else {
            u8::try_from(completed * 100 / total).unwrap_or(100)
        };
        Ok(RemoteProgress {
            total_chapters: total,
            completed_chapters: completed,
            progress_percentage: percentage,
            chapters: Vec::new(),
        })
    }

    async fn mark_chapter_complete(&self, chapter_id: &ChapterId) -> Result<(), ApiError> {
        let mut state = self.state.lock().map_err(lock_err)?;
        *state.mark_calls.entry(chapter_id.clone()).or_insert(0) += 1;

        if state.reject_marks {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "completion rejected".to_string(),
            });
        }

        for chapters in state.chapters.values_mut() {
            if let Some(chapter) = chapters.iter_mut().find(|c| &c.id == chapter_id) {
                chapter.is_completed = true;
                return Ok(());
            }
        }
        Err(ApiError::NotFound)
    }

    async fn request_certificate(
        &self,
        course_id: &CourseId,
    ) -> Result<CertificateIssued, ApiError> {
        let state = self.state.lock().map_err(lock_err)?;
        let chapters = state.chapters.get(course_id).ok_or(ApiError::NotFound)?;
        // Server-side re-validation: no certificate without full completion.
        if chapters.is_empty() || chapters.iter().any(|c| !c.is_completed) {
            return Err(ApiError::Status {
                status: reqwest::StatusCode::FORBIDDEN,
                message: "course is not complete".to_string(),
            });
        }
        Ok(CertificateIssued {
            certificate_url: format!("https://certs.example.com/{course_id}.pdf"),
            message: "certificate issued".to_string(),
        })
    }
}
