use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::Module;
use crate::services::catalog::CourseView;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) duration: String,
    pub(crate) teacher_id: String,
    #[serde(default)]
    pub(crate) prerequisites: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollRequest {
    pub(crate) student_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ModuleCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct VideoCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub(crate) url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct StudyMaterialCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "file_name must not be empty"))]
    pub(crate) file_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration: String,
    pub(crate) teacher_id: String,
    pub(crate) teacher_name: String,
    pub(crate) students_enrolled: Vec<String>,
    pub(crate) modules: Vec<Module>,
    pub(crate) prerequisites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) progress: Option<u8>,
}

impl CourseResponse {
    pub(crate) fn from_view(view: CourseView) -> Self {
        Self {
            id: view.course.id,
            title: view.course.title,
            description: view.course.description,
            duration: view.course.duration,
            teacher_id: view.course.teacher_id,
            teacher_name: view.teacher_name,
            students_enrolled: view.course.students_enrolled,
            modules: view.course.modules,
            prerequisites: view.course.prerequisites,
            average_rating: view.average_rating,
            progress: view.progress,
        }
    }
}
