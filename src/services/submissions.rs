use uuid::Uuid;

use crate::domain::models::{Grade, Submission};
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::notifications::{self, DomainEvent};
use crate::services::rules;
use crate::store::RecordStore;

/// Creates the single submission allowed per (assignment, student) pair.
/// Text content and a file reference may coexist; at least one is required.
pub(crate) async fn submit_assignment(
    store: &dyn RecordStore,
    assignment_id: &str,
    student_id: &str,
    content: Option<&str>,
    file_name: Option<&str>,
) -> Result<Submission, DomainError> {
    let assignment = repositories::assignments::find_by_id(store, assignment_id)
        .await?
        .ok_or(DomainError::NotFound("Assignment"))?;
    let student = repositories::users::find_by_id(store, student_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    let course = repositories::courses::find_by_id(store, &assignment.course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let content = content.map(str::trim).filter(|text| !text.is_empty()).map(str::to_string);
    let file_name = file_name.map(str::trim).filter(|name| !name.is_empty()).map(str::to_string);
    if content.is_none() && file_name.is_none() {
        return Err(DomainError::validation(
            "A submission needs text content or an attached file",
        ));
    }

    if repositories::submissions::find_for_pair(store, &assignment.id, &student.id)
        .await?
        .is_some()
    {
        return Err(DomainError::DuplicateSubmission);
    }

    let submission = Submission {
        id: Uuid::new_v4().to_string(),
        assignment_id: assignment.id.clone(),
        student_id: student.id.clone(),
        content,
        file_name,
        grade: None,
        letter_grade: None,
        review: None,
    };
    repositories::submissions::insert(store, &submission).await?;

    notifications::publish(
        store,
        DomainEvent::SubmissionCreated { course: &course, assignment: &assignment, student: &student },
    )
    .await;
    tracing::info!(
        assignment_id = %assignment.id,
        student_id = %student.id,
        submission_id = %submission.id,
        action = "submission_create",
        "Assignment submitted"
    );
    Ok(submission)
}

pub(crate) async fn grade_submission(
    store: &dyn RecordStore,
    submission_id: &str,
    internal: i64,
    external: i64,
    letter_grade: Option<&str>,
    review: Option<&str>,
) -> Result<Submission, DomainError> {
    if !(0..=100).contains(&internal) || !(0..=100).contains(&external) {
        return Err(DomainError::validation("Marks must be between 0 and 100"));
    }

    let submission = repositories::submissions::find_by_id(store, submission_id)
        .await?
        .ok_or(DomainError::NotFound("Submission"))?;

    let internal = internal as u8;
    let external = external as u8;
    let grade = Grade { internal, external, final_score: rules::final_grade(internal, external) };
    repositories::submissions::set_grade(store, &submission.id, &grade, letter_grade, review)
        .await?;

    let graded = repositories::submissions::find_by_id(store, submission_id)
        .await?
        .ok_or(DomainError::NotFound("Submission"))?;

    match repositories::assignments::find_by_id(store, &graded.assignment_id).await? {
        Some(assignment) => {
            notifications::publish(
                store,
                DomainEvent::SubmissionGraded {
                    assignment: &assignment,
                    student_id: &graded.student_id,
                },
            )
            .await;
        }
        None => {
            tracing::warn!(
                submission_id = %graded.id,
                assignment_id = %graded.assignment_id,
                "Assignment missing; skipping grade notification"
            );
        }
    }

    tracing::info!(
        submission_id = %graded.id,
        final_score = grade.final_score,
        action = "submission_grade",
        "Submission graded"
    );
    Ok(graded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SubmissionStatus;
    use crate::repositories;
    use crate::store::memory::MemoryStore;
    use crate::test_support::fixtures;

    #[tokio::test]
    async fn submit_then_grade_reaches_the_graded_state() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;

        let submission =
            submit_assignment(&store, &assignment.id, &student.id, Some("my answer"), None)
                .await
                .expect("submit");
        assert_eq!(submission.status(), SubmissionStatus::Submitted);

        let graded =
            grade_submission(&store, &submission.id, 90, 94, Some("A"), Some("Great work!"))
                .await
                .expect("grade");
        assert_eq!(graded.status(), SubmissionStatus::Graded);
        let grade = graded.grade.expect("grade present");
        assert_eq!(grade.final_score, 92);
        assert_eq!(graded.letter_grade.as_deref(), Some("A"));

        // Teacher heard about the submission, student about the grade.
        let teacher_inbox =
            repositories::notifications::list_by_user(&store, &teacher.id).await.expect("inbox");
        assert!(teacher_inbox.iter().any(|n| n.message.contains("submitted an assignment")));
        let student_inbox =
            repositories::notifications::list_by_user(&store, &student.id).await.expect("inbox");
        assert!(student_inbox.iter().any(|n| n.message.contains("has been graded")));
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected_even_with_different_content() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;

        submit_assignment(&store, &assignment.id, &student.id, Some("first"), None)
            .await
            .expect("submit");
        let err = submit_assignment(&store, &assignment.id, &student.id, Some("second"), None)
            .await
            .expect_err("should fail");
        assert!(matches!(err, DomainError::DuplicateSubmission));
    }

    #[tokio::test]
    async fn empty_submission_is_rejected() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;

        let err = submit_assignment(&store, &assignment.id, &student.id, Some("   "), None)
            .await
            .expect_err("should fail");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn file_only_submission_is_accepted() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;

        let submission =
            submit_assignment(&store, &assignment.id, &student.id, None, Some("project.zip"))
                .await
                .expect("submit");
        assert_eq!(submission.file_name.as_deref(), Some("project.zip"));
        assert!(submission.content.is_none());
    }

    #[tokio::test]
    async fn marks_outside_range_fail_validation() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;
        let submission =
            submit_assignment(&store, &assignment.id, &student.id, Some("answer"), None)
                .await
                .expect("submit");

        for (internal, external) in [(101, 50), (50, 101), (-1, 50), (50, -1)] {
            let err = grade_submission(&store, &submission.id, internal, external, None, None)
                .await
                .expect_err("should fail");
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }
}
