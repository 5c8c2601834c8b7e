use serde_json::json;

use super::{decode, decode_all, encode};
use crate::domain::models::{Course, Module, StudyMaterial, Video};
use crate::store::{Collection, RecordStore, StoreError};

const COLLECTION: Collection = Collection::Courses;

pub(crate) async fn find_by_id(
    store: &dyn RecordStore,
    course_id: &str,
) -> Result<Option<Course>, StoreError> {
    store.get_by_id(COLLECTION, course_id).await?.map(|doc| decode(COLLECTION, doc)).transpose()
}

pub(crate) async fn list(store: &dyn RecordStore) -> Result<Vec<Course>, StoreError> {
    decode_all(COLLECTION, store.list(COLLECTION).await?)
}

pub(crate) async fn list_by_teacher(
    store: &dyn RecordStore,
    teacher_id: &str,
) -> Result<Vec<Course>, StoreError> {
    decode_all(COLLECTION, store.get_where(COLLECTION, "teacher_id", &json!(teacher_id)).await?)
}

/// Courses whose `students_enrolled` array contains the student.
pub(crate) async fn list_by_student(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<Course>, StoreError> {
    decode_all(
        COLLECTION,
        store.get_where(COLLECTION, "students_enrolled", &json!(student_id)).await?,
    )
}

pub(crate) async fn insert(store: &dyn RecordStore, course: &Course) -> Result<(), StoreError> {
    store.insert(COLLECTION, encode(COLLECTION, course)?).await?;
    Ok(())
}

pub(crate) async fn set_enrolled_students(
    store: &dyn RecordStore,
    course_id: &str,
    students_enrolled: &[String],
) -> Result<(), StoreError> {
    store.update(COLLECTION, course_id, json!({"students_enrolled": students_enrolled})).await
}

pub(crate) async fn append_module(
    store: &dyn RecordStore,
    course_id: &str,
    module: &Module,
) -> Result<(), StoreError> {
    store.append_child(COLLECTION, course_id, "modules", encode(COLLECTION, module)?).await?;
    Ok(())
}

pub(crate) async fn append_video(
    store: &dyn RecordStore,
    course_id: &str,
    module_id: &str,
    video: &Video,
) -> Result<(), StoreError> {
    store
        .append_child(
            COLLECTION,
            course_id,
            &format!("modules.{module_id}.videos"),
            encode(COLLECTION, video)?,
        )
        .await?;
    Ok(())
}

pub(crate) async fn append_study_material(
    store: &dyn RecordStore,
    course_id: &str,
    module_id: &str,
    material: &StudyMaterial,
) -> Result<(), StoreError> {
    store
        .append_child(
            COLLECTION,
            course_id,
            &format!("modules.{module_id}.study_materials"),
            encode(COLLECTION, material)?,
        )
        .await?;
    Ok(())
}
