use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use lms_core::{Chapter, ChapterId, Course, CourseId};

use crate::api::{ApiError, CertificateIssued, RemoteProgress, StudentApi};
use crate::session::Session;

/// `reqwest`-backed implementation of the student API.
#[derive(Clone)]
pub struct HttpStudentApi {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpStudentApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/{path}", self.base_url))
            .bearer_auth(self.session.token())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(self.session.token())
    }
}

/// Map a non-success response to an `ApiError`, decoding the server's
/// `{"error": ...}` envelope when one is present.
async fn error_for(response: Response) -> ApiError {
    let status = response.status();
    match status {
        reqwest::StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        reqwest::StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            ApiError::Status { status, message }
        }
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_for(response).await);
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        debug!("GET student/courses");
        let response = self.get("student/courses").send().await?;
        let body: CoursesResponse = decode(response).await?;
        Ok(body.courses.into_iter().map(CourseDto::into_course).collect())
    }

    async fn fetch_chapters(&self, course_id: &CourseId) -> Result<Vec<Chapter>, ApiError> {
        debug!(%course_id, "GET student chapters");
        let response = self
            .get(&format!("student/courses/{course_id}/chapters"))
            .send()
            .await?;
        let body: ChaptersResponse = decode(response).await?;
        Ok(body.chapters)
    }

    async fn fetch_progress(&self, course_id: &CourseId) -> Result<RemoteProgress, ApiError> {
        debug!(%course_id, "GET student progress");
        let response = self
            .get(&format!("student/courses/{course_id}/progress"))
            .send()
            .await?;
        decode(response).await
    }

    async fn mark_chapter_complete(&self, chapter_id: &ChapterId) -> Result<(), ApiError> {
        debug!(%chapter_id, "POST mark chapter complete");
        let response = self
            .post(&format!("student/chapters/{chapter_id}/complete"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    async fn request_certificate(
        &self,
        course_id: &CourseId,
    ) -> Result<CertificateIssued, ApiError> {
        debug!(%course_id, "GET course certificate");
        let response = self
            .get(&format!("student/courses/{course_id}/certificate"))
            .send()
            .await?;
        decode(response).await
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct ChaptersResponse {
    chapters: Vec<Chapter>,
}

#[derive(Debug, Deserialize)]
struct CoursesResponse {
    courses: Vec<CourseDto>,
}

/// Course listing entry as the server actually sends it.
///
/// The listing endpoint serializes `total_chapters` as a string, so this DTO
/// absorbs that quirk instead of leaking it into the domain model.
#[derive(Debug, Deserialize)]
struct CourseDto {
    id: CourseId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    mentor_name: Option<String>,
    #[serde(default)]
    total_chapters: Option<String>,
    #[serde(default)]
    completed_chapters: u32,
    #[serde(default)]
    progress_percentage: u8,
    #[serde(default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CourseDto {
    fn into_course(self) -> Course {
        let total_chapters = self
            .total_chapters
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            mentor_name: self.mentor_name,
            total_chapters,
            completed_chapters: self.completed_chapters,
            progress_percentage: self.progress_percentage,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_dto_parses_stringly_typed_counts() {
        let dto: CourseDto = serde_json::from_str(
            r#"{"id":"c-1","title":"Rust 101","total_chapters":"12","completed_chapters":3}"#,
        )
        .unwrap();
        let course = dto.into_course();
        assert_eq!(course.total_chapters, 12);
        assert_eq!(course.completed_chapters, 3);
        assert_eq!(course.progress_percentage, 0);
    }

    #[test]
    fn course_dto_tolerates_missing_counts() {
        let dto: CourseDto = serde_json::from_str(r#"{"id":"c-2","title":"Empty"}"#).unwrap();
        let course = dto.into_course();
        assert_eq!(course.total_chapters, 0);
        assert!(course.mentor_name.is_none());
    }

    #[test]
    fn chapters_payload_decodes_into_domain_chapters() {
        let body: ChaptersResponse = serde_json::from_str(
            r#"{"chapters":[
                {"id":"ch-1","title":"Intro","content":"...","sequence_order":1,"is_completed":true},
                {"id":"ch-2","title":"Next","content":"...","sequence_order":2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.chapters.len(), 2);
        assert!(body.chapters[0].is_completed);
        assert!(!body.chapters[1].is_completed);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpStudentApi::new(
            "https://lms.example.com/api/",
            Session::new("t", lms_core::Role::Student),
        );
        assert_eq!(api.base_url, "https://lms.example.com/api");
    }
}
