use serde_json::json;

use super::{decode, decode_all, encode};
use crate::domain::models::{Grade, Submission};
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Submissions;

pub(crate) async fn find_by_id(
    store: &dyn RecordStore,
    submission_id: &str,
) -> Result<Option<Submission>, StoreError> {
    store.get_by_id(COLLECTION, submission_id).await?.map(|doc| decode(COLLECTION, doc)).transpose()
}

/// At most one submission exists per (assignment, student) pair.
pub(crate) async fn find_for_pair(
    store: &dyn RecordStore,
    assignment_id: &str,
    student_id: &str,
) -> Result<Option<Submission>, StoreError> {
    let submissions = list_by_assignment(store, assignment_id).await?;
    Ok(submissions.into_iter().find(|submission| submission.student_id == student_id))
}

pub(crate) async fn list_by_assignment(
    store: &dyn RecordStore,
    assignment_id: &str,
) -> Result<Vec<Submission>, StoreError> {
    decode_all(
        COLLECTION,
        store.get_where(COLLECTION, "assignment_id", &json!(assignment_id)).await?,
    )
}

pub(crate) async fn list_by_student(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<Submission>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "student_id", &json!(student_id)).await?)
}

pub(crate) async fn insert(
    store: &dyn RecordStore,
    submission: &Submission,
) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, submission)?).await?;
    Ok(())
}

pub(crate) async fn set_grade(
    store: &dyn RecordStore,
    submission_id: &str,
    grade: &Grade,
    letter_grade: Option<&str>,
    review: Option<&str>,
) -> Result<(), StoreError> {
    store
        .update(
            COLLECTION,
            submission_id,
            json!({"grade": grade, "letter_grade": letter_grade, "review": review}),
        )
        .await
}
