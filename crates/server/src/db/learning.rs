use sqlx::SqlitePool;

use crate::{
    db::models::{CourseStep, LearningMaterial, UserProgress},
    error::Result,
};

pub async fn list_steps(pool: &SqlitePool, course_id: i64) -> Result<Vec<CourseStep>> {
    let steps = sqlx::query_as::<_, CourseStep>(
        "SELECT id, course_id, number, title, description, video_url \
         FROM course_steps WHERE course_id = ? ORDER BY number ASC",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(steps)
}

/// Exact-number lookup. Current/previous/next resolution uses number +/- 1,
/// not list position, so a gap in the numbering yields None even when more
/// steps exist further out.
pub async fn find_step(
    pool: &SqlitePool,
    course_id: i64,
    number: i64,
) -> Result<Option<CourseStep>> {
    let step = sqlx::query_as::<_, CourseStep>(
        "SELECT id, course_id, number, title, description, video_url \
         FROM course_steps WHERE course_id = ? AND number = ?",
    )
    .bind(course_id)
    .bind(number)
    .fetch_optional(pool)
    .await?;

    Ok(step)
}

pub async fn list_materials(
    pool: &SqlitePool,
    course_id: i64,
    step_number: i64,
) -> Result<Vec<LearningMaterial>> {
    let materials = sqlx::query_as::<_, LearningMaterial>(
        "SELECT id, course_id, step_number, material_type, title, url, content \
         FROM learning_materials WHERE course_id = ? AND step_number = ? ORDER BY id ASC",
    )
    .bind(course_id)
    .bind(step_number)
    .fetch_all(pool)
    .await?;

    Ok(materials)
}

/// Record the furthest step a user has reached; never moves backwards.
pub async fn upsert_progress(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
    step_number: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_progress (user_id, course_id, step_number) VALUES (?, ?, ?)
        ON CONFLICT (user_id, course_id)
        DO UPDATE SET step_number = MAX(step_number, excluded.step_number)
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .bind(step_number)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_progress(
    pool: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<Option<UserProgress>> {
    let progress = sqlx::query_as::<_, UserProgress>(
        "SELECT id, user_id, course_id, step_number \
         FROM user_progress WHERE user_id = ? AND course_id = ?",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await?;

    Ok(progress)
}
