use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod announcement;
pub(crate) mod assignment;
pub(crate) mod course;
pub(crate) mod forum;
pub(crate) mod notification;
pub(crate) mod review;
pub(crate) mod submission;
pub(crate) mod user;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}
