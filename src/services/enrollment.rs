use crate::domain::models::Course;
use crate::repositories;
use crate::services::errors::DomainError;
use crate::services::notifications::{self, DomainEvent};
use crate::services::rules;
use crate::store::RecordStore;

/// Idempotent enrollment: re-enrolling an already-enrolled student returns
/// the course unchanged, with no error and no duplicate notification.
pub(crate) async fn enroll(
    store: &dyn RecordStore,
    course_id: &str,
    student_id: &str,
) -> Result<Course, DomainError> {
    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;
    let student = repositories::users::find_by_id(store, student_id)
        .await?
        .ok_or(DomainError::NotFound("User"))?;

    if course.is_enrolled(student_id) {
        tracing::debug!(course_id = %course.id, student_id = %student.id, "Student already enrolled");
        return Ok(course);
    }

    let missing = unmet_prerequisites(store, &course, student_id).await?;
    if !missing.is_empty() {
        let titles =
            missing.iter().map(|entry| entry.title.as_str()).collect::<Vec<_>>().join(", ");
        return Err(DomainError::PrerequisiteNotMet {
            missing: missing.into_iter().map(|entry| entry.course_id).collect(),
            titles,
        });
    }

    let mut students_enrolled = course.students_enrolled.clone();
    students_enrolled.push(student_id.to_string());
    repositories::courses::set_enrolled_students(store, &course.id, &students_enrolled).await?;

    let course = repositories::courses::find_by_id(store, course_id)
        .await?
        .ok_or(DomainError::NotFound("Course"))?;

    notifications::publish(store, DomainEvent::StudentEnrolled { course: &course, student: &student })
        .await;
    tracing::info!(
        course_id = %course.id,
        student_id = %student.id,
        action = "course_enroll",
        "Student enrolled"
    );
    Ok(course)
}

#[derive(Debug)]
pub(crate) struct UnmetPrerequisite {
    pub(crate) course_id: String,
    pub(crate) title: String,
}

/// A prerequisite is satisfied when the student is enrolled in it and has
/// 100% progress. A prerequisite id that no longer resolves still blocks
/// enrollment, under a placeholder title.
pub(crate) async fn unmet_prerequisites(
    store: &dyn RecordStore,
    course: &Course,
    student_id: &str,
) -> Result<Vec<UnmetPrerequisite>, DomainError> {
    let mut missing = Vec::new();
    if course.prerequisites.is_empty() {
        return Ok(missing);
    }

    let submissions = repositories::submissions::list_by_student(store, student_id).await?;
    for prerequisite_id in &course.prerequisites {
        let Some(prerequisite) = repositories::courses::find_by_id(store, prerequisite_id).await?
        else {
            missing.push(UnmetPrerequisite {
                course_id: prerequisite_id.clone(),
                title: "Unknown Course".to_string(),
            });
            continue;
        };

        let completed = if prerequisite.is_enrolled(student_id) {
            let assignments =
                repositories::assignments::list_by_course(store, &prerequisite.id).await?;
            rules::compute_progress(&assignments, &submissions) == 100
        } else {
            false
        };

        if !completed {
            missing.push(UnmetPrerequisite {
                course_id: prerequisite.id,
                title: prerequisite.title,
            });
        }
    }
    Ok(missing)
}
