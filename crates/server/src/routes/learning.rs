use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        self,
        models::{Course, CourseStep, LearningMaterial},
    },
    error::{AppError, Result},
    middleware::auth::AuthUser,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:course_id", get(learning_view))
        .route("/:course_id/progress", post(record_progress))
}

#[derive(Debug, Deserialize)]
pub struct LearningQuery {
    pub step: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LearningResponse {
    pub course: Course,
    pub steps: Vec<CourseStep>,
    pub current_step: Option<CourseStep>,
    pub previous_step: Option<CourseStep>,
    pub next_step: Option<CourseStep>,
    pub materials: Vec<LearningMaterial>,
    pub progress: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub step_number: i64,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub message: String,
    pub course_id: i64,
    pub step_number: i64,
}

async fn learning_view(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
    Query(query): Query<LearningQuery>,
) -> Result<Json<LearningResponse>> {
    let step = query.step.unwrap_or(1);

    let course = db::courses::find_by_id(&state.db.pool, course_id).await?;
    let steps = db::learning::list_steps(&state.db.pool, course_id).await?;

    // Neighbors are found by step number, not list position, so numbering
    // gaps yield None even when more steps exist further out.
    let current_step = db::learning::find_step(&state.db.pool, course_id, step).await?;
    let previous_step = db::learning::find_step(&state.db.pool, course_id, step - 1).await?;
    let next_step = db::learning::find_step(&state.db.pool, course_id, step + 1).await?;

    let materials = db::learning::list_materials(&state.db.pool, course_id, step).await?;

    let progress = if steps.is_empty() {
        0.0
    } else {
        step as f64 / steps.len() as f64 * 100.0
    };

    // Reaching a step records it as progress; the upsert keeps the furthest.
    if current_step.is_some() {
        db::learning::upsert_progress(&state.db.pool, user.id, course_id, step).await?;
    }

    Ok(Json(LearningResponse {
        course,
        steps,
        current_step,
        previous_step,
        next_step,
        materials,
        progress,
    }))
}

async fn record_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
    Json(body): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>> {
    db::courses::find_by_id(&state.db.pool, course_id).await?;

    if db::learning::find_step(&state.db.pool, course_id, body.step_number)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Step not found".to_string()));
    }

    db::learning::upsert_progress(&state.db.pool, user.id, course_id, body.step_number).await?;

    let progress = db::learning::find_progress(&state.db.pool, user.id, course_id)
        .await?
        .map(|p| p.step_number)
        .unwrap_or(body.step_number);

    Ok(Json(ProgressResponse {
        message: "Progress saved.".to_string(),
        course_id,
        step_number: progress,
    }))
}
