use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::domain::types::{SubmissionStatus, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) last_login: Option<OffsetDateTime>,
    #[serde(default)]
    pub(crate) login_streak: u32,
    #[serde(default)]
    pub(crate) badges: Vec<Badge>,
}

/// Static catalog entry; copied by value into `User::badges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Badge {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration: String,
    pub(crate) teacher_id: String,
    #[serde(default)]
    pub(crate) students_enrolled: Vec<String>,
    #[serde(default)]
    pub(crate) modules: Vec<Module>,
    #[serde(default)]
    pub(crate) prerequisites: Vec<String>,
}

impl Course {
    pub(crate) fn is_enrolled(&self, student_id: &str) -> bool {
        self.students_enrolled.iter().any(|id| id == student_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Module {
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) videos: Vec<Video>,
    #[serde(default)]
    pub(crate) study_materials: Vec<StudyMaterial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Video {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StudyMaterial {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Assignment {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) deadline: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Grade {
    pub(crate) internal: u8,
    pub(crate) external: u8,
    pub(crate) final_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Submission {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) file_name: Option<String>,
    #[serde(default)]
    pub(crate) grade: Option<Grade>,
    #[serde(default)]
    pub(crate) letter_grade: Option<String>,
    #[serde(default)]
    pub(crate) review: Option<String>,
}

impl Submission {
    pub(crate) fn status(&self) -> SubmissionStatus {
        if self.grade.is_some() {
            SubmissionStatus::Graded
        } else {
            SubmissionStatus::Submitted
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Announcement {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Review {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) rating: u8,
    pub(crate) comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Thread {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) author_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Reply {
    pub(crate) id: String,
    pub(crate) thread_id: String,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) author_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Notification {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) message: String,
    pub(crate) link: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created_at: OffsetDateTime,
    pub(crate) read: bool,
}
