use serde::Deserialize;
use time::Date;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AssignmentCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) deadline: Option<Date>,
}
