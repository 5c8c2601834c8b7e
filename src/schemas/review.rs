use serde::{Deserialize, Serialize};

use crate::core::time::format_timestamp;
use crate::domain::models::Review;

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewCreate {
    pub(crate) student_id: String,
    pub(crate) rating: u8,
    #[serde(default)]
    pub(crate) comment: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) rating: u8,
    pub(crate) comment: String,
    pub(crate) created_at: String,
}

impl ReviewResponse {
    pub(crate) fn from_domain(review: Review) -> Self {
        Self {
            id: review.id,
            course_id: review.course_id,
            student_id: review.student_id,
            student_name: review.student_name,
            rating: review.rating,
            comment: review.comment,
            created_at: format_timestamp(review.created_at),
        }
    }
}
