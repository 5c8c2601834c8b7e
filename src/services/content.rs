//! Teacher-authored content mutations: courses, assignments, modules and
//! the nested module media, plus announcements.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::models::{Announcement, Assignment, Course, Module, StudyMaterial, Video};
use crate::domain::types::UserRole;
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::notifications::{self, DomainEvent};
use crate::store::{RecordStore, StoreError};

pub(crate) async fn create_course(
    store: &dyn RecordStore,
    title: &str,
    description: &str,
    duration: &str,
    teacher_id: &str,
    prerequisites: Vec<String>,
) -> Result<Course, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Course title must not be empty"));
    }

    let teacher = repositories::users::find_by_id(store, teacher_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;
    if teacher.role != UserRole::Teacher {
        return Err(DomainError::validation("Only teachers can create courses"));
    }

    for prerequisite_id in &prerequisites {
        if repositories::courses::find_by_id(store, prerequisite_id).await?.is_none() {
            return Err(DomainError::validation(format!(
                "Unknown prerequisite course: {prerequisite_id}"
            )));
        }
    }

    let course = Course {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.trim().to_string(),
        duration: duration.trim().to_string(),
        teacher_id: teacher.id.clone(),
        students_enrolled: Vec::new(),
        modules: Vec::new(),
        prerequisites,
    };
    repositories::courses::insert(store, &course).await?;

    tracing::info!(
        course_id = %course.id,
        teacher_id = %teacher.id,
        action = "course_create",
        "Course created"
    );
    Ok(course)
}

pub(crate) async fn create_assignment(
    store: &dyn RecordStore,
    course_id: &str,
    title: &str,
    description: &str,
    deadline: Option<Date>,
) -> Result<Assignment, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Assignment title must not be empty"));
    }

    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let assignment = Assignment {
        id: Uuid::new_v4().to_string(),
        course_id: course.id.clone(),
        title: title.to_string(),
        description: description.trim().to_string(),
        deadline,
    };
    repositories::assignments::insert(store, &assignment).await?;

    notifications::publish(
        store,
        DomainEvent::AssignmentCreated { course: &course, assignment: &assignment },
    )
    .await;
    tracing::info!(
        course_id = %course.id,
        assignment_id = %assignment.id,
        action = "assignment_create",
        "Assignment created"
    );
    Ok(assignment)
}

pub(crate) async fn create_module(
    store: &dyn RecordStore,
    course_id: &str,
    title: &str,
) -> Result<Module, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Module title must not be empty"));
    }

    let module = Module {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        videos: Vec::new(),
        study_materials: Vec::new(),
    };
    repositories::courses::append_module(store, course_id, &module)
        .await
        .map_err(map_append_error)?;
    Ok(module)
}

pub(crate) async fn add_video(
    store: &dyn RecordStore,
    course_id: &str,
    module_id: &str,
    title: &str,
    url: &str,
) -> Result<Video, DomainError> {
    let title = title.trim();
    let url = url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(DomainError::validation("Video title and url must not be empty"));
    }

    let video =
        Video { id: Uuid::new_v4().to_string(), title: title.to_string(), url: url.to_string() };
    repositories::courses::append_video(store, course_id, module_id, &video)
        .await
        .map_err(map_append_error)?;
    Ok(video)
}

pub(crate) async fn add_study_material(
    store: &dyn RecordStore,
    course_id: &str,
    module_id: &str,
    title: &str,
    file_name: &str,
) -> Result<StudyMaterial, DomainError> {
    let title = title.trim();
    let file_name = file_name.trim();
    if title.is_empty() || file_name.is_empty() {
        return Err(DomainError::validation("Material title and file name must not be empty"));
    }

    let material = StudyMaterial {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        file_name: file_name.to_string(),
    };
    repositories::courses::append_study_material(store, course_id, module_id, &material)
        .await
        .map_err(map_append_error)?;
    Ok(material)
}

pub(crate) async fn create_announcement(
    store: &dyn RecordStore,
    course_id: &str,
    title: &str,
    content: &str,
    now: OffsetDateTime,
) -> Result<Announcement, DomainError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(DomainError::validation("Announcement title and content must not be empty"));
    }

    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    let announcement = Announcement {
        id: Uuid::new_v4().to_string(),
        course_id: course.id.clone(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
    };
    repositories::announcements::insert(store, &announcement).await?;

    notifications::publish(
        store,
        DomainEvent::AnnouncementPosted { course: &course, announcement: &announcement },
    )
    .await;
    tracing::info!(
        course_id = %course.id,
        announcement_id = %announcement.id,
        action = "announcement_create",
        "Announcement posted"
    );
    Ok(announcement)
}

fn map_append_error(err: StoreError) -> DomainError {
    match err {
        StoreError::RecordNotFound { .. } => DomainError::NotFound("Course"),
        StoreError::ChildPathNotFound { .. } => DomainError::NotFound("Module"),
        other => DomainError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories;
    use crate::services::enrollment;
    use crate::store::memory::MemoryStore;
    use crate::test_support::fixtures;

    #[tokio::test]
    async fn students_cannot_create_courses() {
        let store = MemoryStore::new();
        let student = fixtures::student(&store, "Bob Williams").await;

        let err = create_course(&store, "Sneaky Course", "", "4 Weeks", &student.id, Vec::new())
            .await
            .expect_err("should fail");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn assignment_creation_notifies_enrolled_students() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let bob = fixtures::student(&store, "Bob Williams").await;
        let charlie = fixtures::student(&store, "Charlie Brown").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;
        enrollment::enroll(&store, &course.id, &bob.id).await.expect("enroll bob");
        enrollment::enroll(&store, &course.id, &charlie.id).await.expect("enroll charlie");

        create_assignment(&store, &course.id, "Lifetimes", "Explain lifetimes.", None)
            .await
            .expect("create assignment");

        for student_id in [&bob.id, &charlie.id] {
            let inbox = repositories::notifications::list_by_user(&store, student_id)
                .await
                .expect("inbox");
            assert!(inbox.iter().any(|n| n.message.contains("A new assignment \"Lifetimes\"")));
        }
    }

    #[tokio::test]
    async fn module_media_appends_into_the_right_module() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;

        let module = create_module(&store, &course.id, "Getting Started").await.expect("module");
        let video = add_video(&store, &course.id, &module.id, "Hello Rust", "https://example.com/v")
            .await
            .expect("video");
        add_study_material(&store, &course.id, &module.id, "Cheat Sheet", "rust-cheatsheet.pdf")
            .await
            .expect("material");

        let stored = repositories::courses::find_by_id(&store, &course.id)
            .await
            .expect("fetch")
            .expect("course");
        assert_eq!(stored.modules.len(), 1);
        assert_eq!(stored.modules[0].videos.len(), 1);
        assert_eq!(stored.modules[0].videos[0].id, video.id);
        assert_eq!(stored.modules[0].study_materials.len(), 1);
    }

    #[tokio::test]
    async fn media_for_unknown_module_is_not_found() {
        let store = MemoryStore::new();
        let teacher = fixtures::teacher(&store, "Alice Johnson").await;
        let course = fixtures::course(&store, "Introduction to Rust", &teacher.id).await;

        let err = add_video(&store, &course.id, "missing", "Hello", "https://example.com/v")
            .await
            .expect_err("should fail");
        assert!(matches!(err, DomainError::NotFound("Module")));
    }
}
