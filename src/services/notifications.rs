//! Translates domain events into notification records. Routing is a pure
//! mapping so the recipient/template table stays unit-testable; writes are
//! best-effort and never roll back the primary mutation.

use uuid::Uuid;

use crate::core::time::now_utc;
use crate::domain::models::{Announcement, Assignment, Course, Notification, Thread, User};
use crate::repositories;
use crate::store::RecordStore;

pub(crate) enum DomainEvent<'a> {
    StudentEnrolled { course: &'a Course, student: &'a User },
    AssignmentCreated { course: &'a Course, assignment: &'a Assignment },
    SubmissionCreated { course: &'a Course, assignment: &'a Assignment, student: &'a User },
    SubmissionGraded { assignment: &'a Assignment, student_id: &'a str },
    AnnouncementPosted { course: &'a Course, announcement: &'a Announcement },
    ReviewPosted { course: &'a Course, student: &'a User, rating: u8 },
    ThreadCreated { course: &'a Course, thread: &'a Thread, author: &'a User },
    ReplyCreated { course: &'a Course, thread: &'a Thread, author: &'a User },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PendingNotification {
    pub(crate) user_id: String,
    pub(crate) message: String,
    pub(crate) link: String,
}

/// Recipient set and message text for an event. An actor is never routed a
/// notification about their own action.
pub(crate) fn route(event: &DomainEvent<'_>) -> Vec<PendingNotification> {
    match event {
        DomainEvent::StudentEnrolled { course, student } => vec![PendingNotification {
            user_id: course.teacher_id.clone(),
            message: format!(
                "{} has enrolled in your course: \"{}\".",
                student.name, course.title
            ),
            link: format!("/courses/{}/manage", course.id),
        }],
        DomainEvent::AssignmentCreated { course, assignment } => course
            .students_enrolled
            .iter()
            .map(|student_id| PendingNotification {
                user_id: student_id.clone(),
                message: format!(
                    "A new assignment \"{}\" was added to \"{}\".",
                    assignment.title, course.title
                ),
                link: format!("/courses/{}", course.id),
            })
            .collect(),
        DomainEvent::SubmissionCreated { course, assignment, student } => {
            vec![PendingNotification {
                user_id: course.teacher_id.clone(),
                message: format!(
                    "{} submitted an assignment for \"{}\".",
                    student.name, assignment.title
                ),
                link: format!("/assignments/{}/submissions", assignment.id),
            }]
        }
        DomainEvent::SubmissionGraded { assignment, student_id } => vec![PendingNotification {
            user_id: (*student_id).to_string(),
            message: format!("Your submission for \"{}\" has been graded.", assignment.title),
            link: "/grades".to_string(),
        }],
        DomainEvent::AnnouncementPosted { course, announcement } => course
            .students_enrolled
            .iter()
            .map(|student_id| PendingNotification {
                user_id: student_id.clone(),
                message: format!(
                    "New announcement in \"{}\": {}",
                    course.title, announcement.title
                ),
                link: format!("/courses/{}", course.id),
            })
            .collect(),
        DomainEvent::ReviewPosted { course, student, rating } => vec![PendingNotification {
            user_id: course.teacher_id.clone(),
            message: format!(
                "{} left a {}-star review on your course: \"{}\".",
                student.name, rating, course.title
            ),
            link: format!("/courses/{}", course.id),
        }],
        DomainEvent::ThreadCreated { course, thread, author } => vec![PendingNotification {
            user_id: course.teacher_id.clone(),
            message: format!(
                "{} started a new discussion in \"{}\": {}",
                author.name, course.title, thread.title
            ),
            link: format!("/threads/{}", thread.id),
        }],
        DomainEvent::ReplyCreated { course, thread, author } => {
            let mut pending = Vec::new();
            if course.teacher_id != author.id {
                pending.push(PendingNotification {
                    user_id: course.teacher_id.clone(),
                    message: format!(
                        "{} replied to a discussion in \"{}\".",
                        author.name, course.title
                    ),
                    link: format!("/threads/{}", thread.id),
                });
            }
            if thread.author_id != author.id {
                pending.push(PendingNotification {
                    user_id: thread.author_id.clone(),
                    message: format!(
                        "{} replied to your discussion: \"{}\".",
                        author.name, thread.title
                    ),
                    link: format!("/threads/{}", thread.id),
                });
            }
            pending
        }
    }
}

/// Writes one notification record per routed recipient. Failed writes are
/// logged and skipped; the primary mutation has already committed.
pub(crate) async fn publish(store: &dyn RecordStore, event: DomainEvent<'_>) {
    let created_at = now_utc();
    for pending in route(&event) {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: pending.user_id,
            message: pending.message,
            link: pending.link,
            created_at,
            read: false,
        };
        if let Err(err) = repositories::notifications::insert(store, &notification).await {
            tracing::warn!(
                error = %err,
                user_id = %notification.user_id,
                "Failed to write notification"
            );
        }
    }
}
