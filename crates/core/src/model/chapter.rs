use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ChapterId;

/// One ordered unit of course content, as last reported by the server.
///
/// `sequence_order` defines traversal order within a course. The server is
/// expected to issue positive, unique values, but the client tolerates gaps
/// and duplicates (see `progress::compute_view`).
///
/// `title`, `content` and the media URLs are opaque display payload; nothing
/// in the progress derivation interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub sequence_order: u32,
    /// Completion flag as last reported by the server, not the derived state.
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Chapter {
    /// Creates an incomplete chapter with no media attachments.
    #[must_use]
    pub fn new(
        id: ChapterId,
        title: impl Into<String>,
        content: impl Into<String>,
        sequence_order: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            image_url: None,
            video_url: None,
            sequence_order,
            is_completed: false,
            completed_at: None,
        }
    }

    /// Returns a copy with the server-reported completion flag set.
    #[must_use]
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chapter_starts_incomplete() {
        let chapter = Chapter::new(ChapterId::new("ch-1"), "Intro", "...", 1);
        assert!(!chapter.is_completed);
        assert!(chapter.completed_at.is_none());
        assert!(chapter.image_url.is_none());
    }

    #[test]
    fn with_completed_sets_flag() {
        let chapter = Chapter::new(ChapterId::new("ch-1"), "Intro", "...", 1).with_completed(true);
        assert!(chapter.is_completed);
    }
}
