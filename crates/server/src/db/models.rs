use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub level: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseStep {
    pub id: i64,
    pub course_id: i64,
    pub number: i64,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

/// Furthest step a user has reached in a course.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub step_number: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Text,
    Video,
    Document,
    Quiz,
}

/// Content item attached to a course step. Depending on `material_type`
/// either `url` (video/document) or `content` (text/quiz) carries the payload.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LearningMaterial {
    pub id: i64,
    pub course_id: i64,
    pub step_number: i64,
    pub material_type: MaterialType,
    pub title: String,
    pub url: Option<String>,
    pub content: Option<String>,
}
