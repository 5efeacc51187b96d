use thiserror::Error;
use tracing::warn;

use crate::model::{Chapter, ChapterId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Typed failures for completion preflight checks.
///
/// These are expected business outcomes, not exceptional conditions; callers
/// branch on them (e.g. to keep a lock icon in place) rather than bubbling
/// them to an error boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("chapter {chapter_id} is locked; complete the preceding chapter first")]
    ChapterLocked { chapter_id: ChapterId },

    #[error("chapter {chapter_id} is not part of this course")]
    ChapterNotFound { chapter_id: ChapterId },
}

//
// ─── DERIVED VIEW TYPES ────────────────────────────────────────────────────────
//

/// A chapter together with its derived unlock/completion state.
///
/// `is_completed` mirrors the server-reported flag after normalization;
/// `is_unlocked` is derived and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterView {
    pub chapter: Chapter,
    pub is_completed: bool,
    pub is_unlocked: bool,
}

impl ChapterView {
    #[must_use]
    pub fn id(&self) -> &ChapterId {
        &self.chapter.id
    }
}

/// Aggregated completion state for a course, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseProgress {
    pub total_chapters: usize,
    pub completed_chapters: usize,
    /// `floor(100 * completed / total)`; `0` for an empty course.
    pub progress_percentage: u8,
    pub is_course_complete: bool,
}

impl CourseProgress {
    /// Derive aggregate progress from completion counts.
    #[must_use]
    pub fn from_counts(completed_chapters: usize, total_chapters: usize) -> Self {
        let progress_percentage = if total_chapters == 0 {
            0
        } else {
            u8::try_from(completed_chapters * 100 / total_chapters).unwrap_or(100)
        };
        Self {
            total_chapters,
            completed_chapters,
            progress_percentage,
            is_course_complete: total_chapters > 0 && completed_chapters == total_chapters,
        }
    }
}

/// Duplicate `sequence_order` reported by the server.
///
/// Recorded, never fatal: the affected chapters keep their relative input
/// order and the view stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAnomaly {
    pub sequence_order: u32,
    pub chapter_id: ChapterId,
}

/// Fully derived traversal state for one course.
///
/// `chapters` is sorted ascending by `sequence_order` (stable on ties), so
/// index position implies sequence position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub chapters: Vec<ChapterView>,
    pub progress: CourseProgress,
    pub anomalies: Vec<SequenceAnomaly>,
}

/// Outcome of a successful completion preflight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCheck {
    /// The chapter is unlocked and incomplete; a remote call is warranted.
    ReadyToComplete,
    /// The chapter is already complete; treat the request as a no-op success.
    AlreadyCompleted,
}

//
// ─── DERIVATION ────────────────────────────────────────────────────────────────
//

/// Derive the unlock/completion view for a course's chapter list.
///
/// Pure and deterministic: the same input yields the same output, and the
/// input is never mutated. Chapters are sorted ascending by `sequence_order`
/// with ties broken by input order; the first chapter is always unlocked and
/// each later chapter unlocks iff its predecessor is completed.
///
/// Duplicate `sequence_order` values are recorded as anomalies and logged at
/// `warn`, then handled via the stable tie-break. An empty list yields an
/// empty view with zero progress.
#[must_use]
pub fn compute_view(chapters: &[Chapter]) -> ProgressView {
    if chapters.is_empty() {
        return ProgressView::default();
    }

    let mut sorted: Vec<Chapter> = chapters.to_vec();
    sorted.sort_by_key(|chapter| chapter.sequence_order);

    let anomalies = detect_duplicates(&sorted);
    for anomaly in &anomalies {
        warn!(
            chapter_id = %anomaly.chapter_id,
            sequence_order = anomaly.sequence_order,
            "duplicate chapter sequence order; keeping stable input order"
        );
    }

    let mut views = Vec::with_capacity(sorted.len());
    let mut completed_chapters = 0;
    let mut previous_completed = true; // first chapter is always unlocked
    for chapter in sorted {
        let is_completed = chapter.is_completed;
        if is_completed {
            completed_chapters += 1;
        }
        views.push(ChapterView {
            chapter,
            is_completed,
            is_unlocked: previous_completed,
        });
        previous_completed = is_completed;
    }

    let progress = CourseProgress::from_counts(completed_chapters, views.len());
    ProgressView {
        chapters: views,
        progress,
        anomalies,
    }
}

fn detect_duplicates(sorted: &[Chapter]) -> Vec<SequenceAnomaly> {
    let mut anomalies = Vec::new();
    for pair in sorted.windows(2) {
        if pair[0].sequence_order == pair[1].sequence_order {
            anomalies.push(SequenceAnomaly {
                sequence_order: pair[1].sequence_order,
                chapter_id: pair[1].id.clone(),
            });
        }
    }
    anomalies
}

/// Whether the learner qualifies for the course certificate.
///
/// Deliberately the same predicate as `is_course_complete` so the certificate
/// affordance can never disagree with the progress derivation.
#[must_use]
pub fn certificate_eligible(progress: &CourseProgress) -> bool {
    progress.is_course_complete
}

/// Preflight for a completion request against the current chapter list.
///
/// # Errors
///
/// Returns `ProgressError::ChapterNotFound` if `chapter_id` is absent from
/// `chapters` (stale client data), or `ProgressError::ChapterLocked` if the
/// chapter's predecessor is incomplete. Neither outcome warrants a remote
/// call.
pub fn check_completion(
    chapter_id: &ChapterId,
    chapters: &[Chapter],
) -> Result<CompletionCheck, ProgressError> {
    let view = compute_view(chapters);
    let target = view
        .chapters
        .iter()
        .find(|cv| cv.id() == chapter_id)
        .ok_or_else(|| ProgressError::ChapterNotFound {
            chapter_id: chapter_id.clone(),
        })?;

    if target.is_completed {
        return Ok(CompletionCheck::AlreadyCompleted);
    }
    if !target.is_unlocked {
        return Err(ProgressError::ChapterLocked {
            chapter_id: chapter_id.clone(),
        });
    }
    Ok(CompletionCheck::ReadyToComplete)
}

/// Recompute the view as if `chapter_id` had been reported complete.
///
/// This is the optimistic local projection after a successful remote call; it
/// is not durable, and callers should re-fetch for the authoritative state.
#[must_use]
pub fn with_chapter_completed(chapters: &[Chapter], chapter_id: &ChapterId) -> ProgressView {
    let patched: Vec<Chapter> = chapters
        .iter()
        .map(|chapter| {
            if &chapter.id == chapter_id {
                chapter.clone().with_completed(true)
            } else {
                chapter.clone()
            }
        })
        .collect();
    compute_view(&patched)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
