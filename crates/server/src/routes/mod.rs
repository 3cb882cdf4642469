pub mod articles;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enroll;
pub mod home;
pub mod learning;
pub mod profile;
pub mod search;

use serde::Serialize;

/// Body for routes whose only payload is a user-visible notice.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
