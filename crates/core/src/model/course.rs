use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::CourseId;

/// Course listing entry as reported by the server.
///
/// Counts and percentages here are server-computed display values for course
/// lists; the authoritative per-chapter derivation lives in `progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mentor_name: Option<String>,
    #[serde(default)]
    pub total_chapters: u32,
    #[serde(default)]
    pub completed_chapters: u32,
    #[serde(default)]
    pub progress_percentage: u8,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
