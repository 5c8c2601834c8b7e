use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_timestamp;
use crate::domain::models::{Badge, User};
use crate::domain::types::UserRole;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub(crate) email: String,
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ProfileUpdateRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub(crate) email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) last_login: Option<String>,
    pub(crate) login_streak: u32,
    pub(crate) badges: Vec<Badge>,
}

impl UserResponse {
    pub(crate) fn from_domain(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            last_login: user.last_login.map(format_timestamp),
            login_streak: user.login_streak,
            badges: user.badges,
        }
    }
}
