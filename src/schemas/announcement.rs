use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_timestamp;
use crate::domain::models::Announcement;
use crate::services::catalog::AnnouncementView;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AnnouncementCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnouncementResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) course_title: Option<String>,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_at: String,
}

impl AnnouncementResponse {
    pub(crate) fn from_domain(announcement: Announcement) -> Self {
        Self {
            id: announcement.id,
            course_id: announcement.course_id,
            course_title: None,
            title: announcement.title,
            content: announcement.content,
            created_at: format_timestamp(announcement.created_at),
        }
    }

    pub(crate) fn from_view(view: AnnouncementView) -> Self {
        let mut response = Self::from_domain(view.announcement);
        response.course_title = Some(view.course_title);
        response
    }
}
