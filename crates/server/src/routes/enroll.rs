use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::{
    db,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/:course_id", post(enroll))
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub message: String,
    pub enrollment: db::models::Enrollment,
}

async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<EnrollResponse>> {
    let course = db::courses::find_by_id(&state.db.pool, course_id).await?;

    // The existence check gives the friendly notice; the uniqueness
    // constraint behind the insert handles the concurrent double-submit.
    if db::enrollments::exists(&state.db.pool, user.id, course_id).await? {
        return Err(AppError::AlreadyExists(
            "You are already enrolled in this course.".to_string(),
        ));
    }

    let enrollment = db::enrollments::insert(&state.db.pool, user.id, course_id).await?;

    Ok(Json(EnrollResponse {
        message: format!("Successfully enrolled in {}!", course.title),
        enrollment,
    }))
}
