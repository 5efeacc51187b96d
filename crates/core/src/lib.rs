#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod progress;

pub use error::Error;
pub use model::{Chapter, ChapterId, Course, CourseId, Role};
pub use progress::{
    certificate_eligible, check_completion, compute_view, with_chapter_completed, ChapterView,
    CompletionCheck, CourseProgress, ProgressError, ProgressView, SequenceAnomaly,
};
