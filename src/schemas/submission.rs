use serde::{Deserialize, Serialize};

use crate::domain::models::{Grade, Submission};
use crate::domain::types::SubmissionStatus;
use crate::services::catalog::{EnrichedSubmission, SubmissionView};

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) student_id: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GradeRequest {
    pub(crate) internal: i64,
    pub(crate) external: i64,
    #[serde(default)]
    pub(crate) letter_grade: Option<String>,
    #[serde(default)]
    pub(crate) review: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionResponse {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) student_id: String,
    pub(crate) content: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) grade: Option<Grade>,
    pub(crate) letter_grade: Option<String>,
    pub(crate) review: Option<String>,
    pub(crate) status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) assignment_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) course_title: Option<String>,
}

impl SubmissionResponse {
    pub(crate) fn from_domain(submission: Submission) -> Self {
        let status = submission.status();
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            content: submission.content,
            file_name: submission.file_name,
            grade: submission.grade,
            letter_grade: submission.letter_grade,
            review: submission.review,
            status,
            student_name: None,
            assignment_title: None,
            course_id: None,
            course_title: None,
        }
    }

    pub(crate) fn with_student(view: SubmissionView) -> Self {
        let mut response = Self::from_domain(view.submission);
        response.student_name = Some(view.student_name);
        response
    }

    pub(crate) fn enriched(view: EnrichedSubmission) -> Self {
        let mut response = Self::from_domain(view.submission);
        response.assignment_title = Some(view.assignment_title);
        response.course_id = view.course_id;
        response.course_title = Some(view.course_title);
        response
    }
}
