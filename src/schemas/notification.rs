use serde::Serialize;

use crate::core::time::format_timestamp;
use crate::domain::models::Notification;

#[derive(Debug, Serialize)]
pub(crate) struct NotificationResponse {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) message: String,
    pub(crate) link: String,
    pub(crate) created_at: String,
    pub(crate) read: bool,
}

impl NotificationResponse {
    pub(crate) fn from_domain(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            message: notification.message,
            link: notification.link,
            created_at: format_timestamp(notification.created_at),
            read: notification.read,
        }
    }
}
