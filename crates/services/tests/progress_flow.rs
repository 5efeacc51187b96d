use std::sync::Arc;

use client::{ApiError, InMemoryStudentApi, StudentApi};
use lms_core::{Chapter, ChapterId, Course, CourseId, ProgressError};
use services::{CertificateService, ProgressService, ProgressServiceError};

fn course(id: &str) -> Course {
    Course {
        id: CourseId::new(id),
        title: format!("Course {id}"),
        description: String::new(),
        mentor_name: Some("Mentor".to_string()),
        total_chapters: 0,
        completed_chapters: 0,
        progress_percentage: 0,
        created_at: None,
    }
}

fn chapter(id: &str, seq: u32) -> Chapter {
    Chapter::new(ChapterId::new(id), format!("Chapter {id}"), "body", seq)
}

fn three_chapter_course(api: &InMemoryStudentApi) -> CourseId {
    let course_id = CourseId::new("rust-101");
    api.seed_course(
        course("rust-101"),
        vec![chapter("ch-1", 1), chapter("ch-2", 2), chapter("ch-3", 3)],
    );
    course_id
}

fn services_for(api: &InMemoryStudentApi) -> (ProgressService, CertificateService) {
    let api: Arc<dyn StudentApi> = Arc::new(api.clone());
    (
        ProgressService::new(api.clone()),
        CertificateService::new(api),
    )
}

#[tokio::test]
async fn fresh_course_unlocks_only_the_first_chapter() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();

    let unlocked: Vec<bool> = loaded.view.chapters.iter().map(|c| c.is_unlocked).collect();
    assert_eq!(unlocked, [true, false, false]);
    assert_eq!(loaded.view.progress.progress_percentage, 0);
    assert!(!loaded.view.progress.is_course_complete);
}

#[tokio::test]
async fn completing_the_first_chapter_unlocks_the_second() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    let optimistic = progress_svc
        .request_completion(&ChapterId::new("ch-1"), &loaded.chapters)
        .await
        .unwrap();

    // optimistic projection already reflects the completion
    assert!(optimistic.chapters[0].is_completed);
    assert!(optimistic.chapters[1].is_unlocked);
    assert_eq!(optimistic.progress.progress_percentage, 33);

    // the authoritative re-fetch agrees
    let refreshed = progress_svc.load_course_view(&course_id).await.unwrap();
    assert_eq!(refreshed.view, optimistic);
}

#[tokio::test]
async fn full_walkthrough_reaches_certificate_eligibility() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, certificate_svc) = services_for(&api);

    for id in ["ch-1", "ch-2", "ch-3"] {
        let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
        progress_svc
            .request_completion(&ChapterId::new(id), &loaded.chapters)
            .await
            .unwrap();
    }

    let final_view = progress_svc.load_course_view(&course_id).await.unwrap();
    assert_eq!(final_view.view.progress.progress_percentage, 100);
    assert!(final_view.view.progress.is_course_complete);
    assert!(certificate_svc.eligible(&final_view.view.progress));

    let issued = certificate_svc.request_certificate(&course_id).await.unwrap();
    assert!(issued.certificate_url.contains("rust-101"));
}

#[tokio::test]
async fn locked_chapter_is_rejected_without_a_network_call() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    let ch3 = ChapterId::new("ch-3");
    let err = progress_svc
        .request_completion(&ch3, &loaded.chapters)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProgressServiceError::Progress(ProgressError::ChapterLocked { .. })
    ));
    assert_eq!(api.mark_calls(&ch3), 0);
}

#[tokio::test]
async fn unknown_chapter_is_rejected_without_a_network_call() {
    let api = InMemoryStudentApi::new();
    three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let stale = ChapterId::new("ch-99");
    let err = progress_svc
        .request_completion(&stale, &[chapter("ch-1", 1)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProgressServiceError::Progress(ProgressError::ChapterNotFound { .. })
    ));
    assert_eq!(api.mark_calls(&stale), 0);
}

#[tokio::test]
async fn repeated_completion_is_a_noop_success() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let ch1 = ChapterId::new("ch-1");
    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    progress_svc
        .request_completion(&ch1, &loaded.chapters)
        .await
        .unwrap();
    assert_eq!(api.mark_calls(&ch1), 1);

    let refreshed = progress_svc.load_course_view(&course_id).await.unwrap();
    let view_a = progress_svc
        .request_completion(&ch1, &refreshed.chapters)
        .await
        .unwrap();
    let view_b = progress_svc
        .request_completion(&ch1, &refreshed.chapters)
        .await
        .unwrap();

    assert_eq!(view_a, view_b);
    assert_eq!(view_a, refreshed.view);
    // no duplicate remote invocation
    assert_eq!(api.mark_calls(&ch1), 1);
}

#[tokio::test]
async fn remote_rejection_leaves_local_state_unchanged() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);
    api.reject_marks(true);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    let err = progress_svc
        .request_completion(&ChapterId::new("ch-1"), &loaded.chapters)
        .await
        .unwrap_err();

    assert!(matches!(err, ProgressServiceError::RemoteRejected(_)));

    let refreshed = progress_svc.load_course_view(&course_id).await.unwrap();
    assert_eq!(refreshed.view.progress.completed_chapters, 0);
    assert!(!refreshed.view.chapters[0].is_completed);
}

#[tokio::test]
async fn empty_course_has_zero_progress_and_no_certificate() {
    let api = InMemoryStudentApi::new();
    let course_id = CourseId::new("empty");
    api.seed_course(course("empty"), Vec::new());
    let (progress_svc, certificate_svc) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    assert!(loaded.view.chapters.is_empty());
    assert_eq!(loaded.view.progress.total_chapters, 0);
    assert_eq!(loaded.view.progress.progress_percentage, 0);
    assert!(!loaded.view.progress.is_course_complete);
    assert!(!certificate_svc.eligible(&loaded.view.progress));

    let err = certificate_svc
        .request_certificate(&course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, services::CertificateError::Api(_)));
}

#[tokio::test]
async fn duplicate_sequence_orders_are_tolerated_and_recorded() {
    let api = InMemoryStudentApi::new();
    let course_id = CourseId::new("dup");
    api.seed_course(
        course("dup"),
        vec![chapter("a", 1), chapter("b", 2), chapter("c", 2)],
    );
    let (progress_svc, _) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    let ids: Vec<&str> = loaded
        .view
        .chapters
        .iter()
        .map(|c| c.id().as_str())
        .collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(loaded.view.anomalies.len(), 1);
    assert_eq!(loaded.view.anomalies[0].sequence_order, 2);
}

#[tokio::test]
async fn administrative_reset_recomputes_from_the_fresh_list() {
    let api = InMemoryStudentApi::new();
    let course_id = three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let loaded = progress_svc.load_course_view(&course_id).await.unwrap();
    progress_svc
        .request_completion(&ChapterId::new("ch-1"), &loaded.chapters)
        .await
        .unwrap();

    // a reset arrives as a fresh list with cleared flags, not a mutation
    let reset_api = InMemoryStudentApi::new();
    let reset_course_id = three_chapter_course(&reset_api);
    let (reset_svc, _) = services_for(&reset_api);

    let reset_view = reset_svc.load_course_view(&reset_course_id).await.unwrap();
    assert_eq!(reset_view.view.progress.completed_chapters, 0);
    let unlocked: Vec<bool> = reset_view
        .view
        .chapters
        .iter()
        .map(|c| c.is_unlocked)
        .collect();
    assert_eq!(unlocked, [true, false, false]);
}

#[tokio::test]
async fn listing_courses_returns_seeded_entries() {
    let api = InMemoryStudentApi::new();
    three_chapter_course(&api);
    let (progress_svc, _) = services_for(&api);

    let courses = progress_svc.list_courses().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, CourseId::new("rust-101"));
}
