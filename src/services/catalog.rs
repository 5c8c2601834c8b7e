//! Read-side hydration: derived fields (teacher name, average rating,
//! per-student progress, reply counts, cross-entity titles) are computed
//! here at read time and never stored.

use crate::domain::models::{Announcement, Course, Submission, Thread, User};
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::rules;
use crate::store::RecordStore;

#[derive(Debug)]
pub(crate) struct CourseView {
    pub(crate) course: Course,
    pub(crate) teacher_name: String,
    pub(crate) average_rating: Option<f64>,
    pub(crate) progress: Option<u8>,
}

#[derive(Debug)]
pub(crate) struct SubmissionView {
    pub(crate) submission: Submission,
    pub(crate) student_name: String,
}

#[derive(Debug)]
pub(crate) struct EnrichedSubmission {
    pub(crate) submission: Submission,
    pub(crate) assignment_title: String,
    pub(crate) course_id: Option<String>,
    pub(crate) course_title: String,
}

#[derive(Debug)]
pub(crate) struct AnnouncementView {
    pub(crate) announcement: Announcement,
    pub(crate) course_title: String,
}

#[derive(Debug)]
pub(crate) struct ThreadView {
    pub(crate) thread: Thread,
    pub(crate) reply_count: usize,
}

pub(crate) async fn course_view(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<CourseView, DomainError> {
    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;
    hydrate_course(store, course, None).await
}

pub(crate) async fn list_courses(store: &dyn RecordStore) -> Result<Vec<CourseView>, DomainError> {
    let mut views = Vec::new();
    for course in repositories::courses::list(store).await? {
        views.push(hydrate_course(store, course, None).await?);
    }
    Ok(views)
}

/// Courses the student is enrolled in, hydrated with their progress.
pub(crate) async fn courses_for_student(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<CourseView>, DomainError> {
    let mut views = Vec::new();
    for course in repositories::courses::list_by_student(store, student_id).await? {
        views.push(hydrate_course(store, course, Some(student_id)).await?);
    }
    Ok(views)
}

pub(crate) async fn courses_for_teacher(
    store: &dyn RecordStore,
    teacher_id: &str,
) -> Result<Vec<CourseView>, DomainError> {
    let mut views = Vec::new();
    for course in repositories::courses::list_by_teacher(store, teacher_id).await? {
        views.push(hydrate_course(store, course, None).await?);
    }
    Ok(views)
}

pub(crate) async fn hydrate_course(
    store: &dyn RecordStore,
    course: Course,
    progress_for: Option<&str>,
) -> Result<CourseView, DomainError> {
    let teacher_name = repositories::users::find_by_id(store, &course.teacher_id)
        .await?
        .map(|teacher| teacher.name)
        .unwrap_or_else(|| "Unknown Teacher".to_string());

    let reviews = repositories::reviews::list_by_course(store, &course.id).await?;
    let average_rating = rules::average_rating(&reviews);

    let progress = match progress_for {
        Some(student_id) => Some(course_progress(store, &course.id, student_id).await?),
        None => None,
    };

    Ok(CourseView { course, teacher_name, average_rating, progress })
}

pub(crate) async fn course_progress(
    store: &dyn RecordStore,
    course_id: &str,
    student_id: &str,
) -> Result<u8, DomainError> {
    let assignments = repositories::assignments::list_by_course(store, course_id).await?;
    let submissions = repositories::submissions::list_by_student(store, student_id).await?;
    Ok(rules::compute_progress(&assignments, &submissions))
}

/// Enrolled user records for a course; ids that no longer resolve are
/// skipped rather than failing the whole listing.
pub(crate) async fn enrolled_students(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<User>, DomainError> {
    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let mut students = Vec::new();
    for student_id in &course.students_enrolled {
        if let Some(student) = repositories::users::find_by_id(store, student_id).await? {
            students.push(student);
        }
    }
    Ok(students)
}

pub(crate) async fn submissions_for_assignment(
    store: &dyn RecordStore,
    assignment_id: &str,
) -> Result<Vec<SubmissionView>, DomainError> {
    let submissions = repositories::submissions::list_by_assignment(store, assignment_id).await?;
    let mut views = Vec::new();
    for submission in submissions {
        let student_name = repositories::users::find_by_id(store, &submission.student_id)
            .await?
            .map(|student| student.name)
            .unwrap_or_else(|| "Unknown Student".to_string());
        views.push(SubmissionView { submission, student_name });
    }
    Ok(views)
}

/// A student's submissions joined with assignment and course titles.
/// Submissions whose assignment no longer resolves are dropped.
pub(crate) async fn enriched_submissions(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<EnrichedSubmission>, DomainError> {
    let submissions = repositories::submissions::list_by_student(store, student_id).await?;
    let mut enriched = Vec::new();
    for submission in submissions {
        let Some(assignment) =
            repositories::assignments::find_by_id(store, &submission.assignment_id).await?
        else {
            continue;
        };
        let course = repositories::courses::find_by_id(store, &assignment.course_id).await?;
        enriched.push(EnrichedSubmission {
            submission,
            assignment_title: assignment.title,
            course_id: course.as_ref().map(|course| course.id.clone()),
            course_title: course
                .map(|course| course.title)
                .unwrap_or_else(|| "Unknown Course".to_string()),
        });
    }
    Ok(enriched)
}

/// Announcements across every course the student is enrolled in, newest
/// first, tagged with the course title.
pub(crate) async fn announcements_for_student(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<AnnouncementView>, DomainError> {
    let courses = repositories::courses::list_by_student(store, student_id).await?;
    let mut views = Vec::new();
    for course in courses {
        for announcement in repositories::announcements::list_by_course(store, &course.id).await? {
            views.push(AnnouncementView { announcement, course_title: course.title.clone() });
        }
    }
    views.sort_by(|a, b| b.announcement.created_at.cmp(&a.announcement.created_at));
    Ok(views)
}

pub(crate) async fn threads_for_course(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Vec<ThreadView>, DomainError> {
    let mut views = Vec::new();
    for thread in repositories::forum::threads_by_course(store, course_id).await? {
        let reply_count = repositories::forum::count_replies(store, &thread.id).await?;
        views.push(ThreadView { thread, reply_count });
    }
    views.sort_by(|a, b| b.thread.created_at.cmp(&a.thread.created_at));
    Ok(views)
}

pub(crate) async fn thread_view(
    store: &dyn RecordStore,
    thread_id: &str,
) -> Result<ThreadView, DomainError> {
    let thread = repositories::forum::find_thread(store, thread_id)
        .await?
        .ok_or(DomainError::NotFound("Thread"))?;
    let reply_count = repositories::forum::count_replies(store, &thread.id).await?;
    Ok(ThreadView { thread, reply_count })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::services::{enrollment, forum, reviews, submissions};
    use crate::store::memory::MemoryStore;
    use crate::test_support::fixtures;

    #[tokio::test]
    async fn course_view_carries_teacher_name_and_rating() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        enrollment::enroll(&store, &course.id, &student.id).await.expect("enroll");

        let view = course_view(&store, &course.id).await.expect("view");
        assert_eq!(view.teacher_name, "Alice Johnson");
        assert_eq!(view.average_rating, None);

        reviews::create_review(
            &store,
            &course.id,
            &student.id,
            4,
            "Solid",
            datetime!(2026-04-01 12:00 UTC),
        )
        .await
        .expect("review");

        let view = course_view(&store, &course.id).await.expect("view");
        assert_eq!(view.average_rating, Some(4.0));
    }

    #[tokio::test]
    async fn student_course_listing_reports_progress() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let first = fixtures::assignment(&store, &course.id, "Ownership").await;
        fixtures::assignment(&store, &course.id, "Lifetimes").await;
        enrollment::enroll(&store, &course.id, &student.id).await.expect("enroll");

        submissions::submit_assignment(&store, &first.id, &student.id, Some("done"), None)
            .await
            .expect("submit");

        let views = courses_for_student(&store, &student.id).await.expect("views");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].progress, Some(50));
    }

    #[tokio::test]
    async fn thread_listing_counts_replies_newest_first() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;

        let older = forum::create_thread(
            &store,
            &course.id,
            "First question",
            "?",
            &student.id,
            datetime!(2026-04-01 10:00 UTC),
        )
        .await
        .expect("thread");
        let newer = forum::create_thread(
            &store,
            &course.id,
            "Second question",
            "?",
            &student.id,
            datetime!(2026-04-02 10:00 UTC),
        )
        .await
        .expect("thread");
        forum::create_reply(&store, &older.id, "An answer", &teacher.id, datetime!(2026-04-02 11:00 UTC))
            .await
            .expect("reply");

        let views = threads_for_course(&store, &course.id).await.expect("views");
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].thread.id, newer.id);
        assert_eq!(views[0].reply_count, 0);
        assert_eq!(views[1].thread.id, older.id);
        assert_eq!(views[1].reply_count, 1);
    }

    #[tokio::test]
    async fn enriched_submissions_skip_dangling_assignments() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;

        submissions::submit_assignment(&store, &assignment.id, &student.id, Some("done"), None)
            .await
            .expect("submit");
        fixtures::orphan_submission(&store, "assignment-gone", &student.id).await;

        let enriched = enriched_submissions(&store, &student.id).await.expect("enriched");
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].assignment_title, "Lifetimes");
        assert_eq!(enriched[0].course_title, "Introduction to Rust");
    }
}
