use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::models::Review;
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::notifications::{self, DomainEvent};
use crate::services::rules;
use crate::store::RecordStore;

/// One review per (course, student), and only once the student's progress
/// in the course is 100%.
pub(crate) async fn create_review(
    store: &dyn RecordStore,
    course_id: &str,
    student_id: &str,
    rating: u8,
    comment: &str,
    now: OffsetDateTime,
) -> Result<Review, DomainError> {
    if !(1..=5).contains(&rating) {
        return Err(DomainError::validation("Rating must be between 1 and 5"));
    }

    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;
    let student = repositories::users::find_by_id(store, student_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    if repositories::reviews::find_for_pair(store, &course.id, &student.id).await?.is_some() {
        return Err(DomainError::DuplicateReview);
    }

    let assignments = repositories::assignments::list_by_course(store, &course.id).await?;
    let submissions = repositories::submissions::list_by_student(store, &student.id).await?;
    if rules::compute_progress(&assignments, &submissions) < 100 {
        return Err(DomainError::validation(
            "Course must be completed before leaving a review",
        ));
    }

    let review = Review {
        id: Uuid::new_v4().to_string(),
        course_id: course.id.clone(),
        student_id: student.id.clone(),
        student_name: student.name.clone(),
        rating,
        comment: comment.trim().to_string(),
        created_at: now,
    };
    repositories::reviews::insert(store, &review).await?;

    notifications::publish(
        store,
        DomainEvent::ReviewPosted { course: &course, student: &student, rating },
    )
    .await;
    tracing::info!(
        course_id = %course.id,
        student_id = %student.id,
        rating,
        action = "review_create",
        "Review posted"
    );
    Ok(review)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::repositories;
    use crate::services::{enrollment, submissions};
    use crate::store::memory::MemoryStore;
    use crate::test_support::fixtures;

    const NOW: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);

    #[tokio::test]
    async fn review_requires_completed_course() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        let assignment = fixtures::assignment(&store, &course.id, "Lifetimes").await;
        enrollment::enroll(&store, &course.id, &student.id).await.expect("enroll");

        let err = create_review(&store, &course.id, &student.id, 5, "Great!", NOW)
            .await
            .expect_err("should fail before completion");
        assert!(matches!(err, DomainError::Validation(_)));

        submissions::submit_assignment(&store, &assignment.id, &student.id, Some("done"), None)
            .await
            .expect("submit");
        let review = create_review(&store, &course.id, &student.id, 5, "Great!", NOW)
            .await
            .expect("review after completion");
        assert_eq!(review.rating, 5);
        assert_eq!(review.student_name, "Bob Williams");

        let inbox =
            repositories::notifications::list_by_user(&store, &teacher.id).await.expect("inbox");
        assert!(inbox.iter().any(|n| n.message.contains("5-star review")));
    }

    #[tokio::test]
    async fn second_review_for_the_pair_is_rejected() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        enrollment::enroll(&store, &course.id, &student.id).await.expect("enroll");

        create_review(&store, &course.id, &student.id, 4, "Good", NOW).await.expect("first");
        let err = create_review(&store, &course.id, &student.id, 5, "Changed my mind", NOW)
            .await
            .expect_err("should fail");
        assert!(matches!(err, DomainError::DuplicateReview));
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let student = fixtures::student(&store, "Bob Williams").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;

        for rating in [0, 6] {
            let err = create_review(&store, &course.id, &student.id, rating, "", NOW)
                .await
                .expect_err("should fail");
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }
}
