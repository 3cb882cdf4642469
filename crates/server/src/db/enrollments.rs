use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::models::{Course, Enrollment},
    error::{AppError, Result},
};

pub async fn exists(pool: &SqlitePool, user_id: i64, course_id: i64) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM enrollments WHERE user_id = ? AND course_id = ?",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Insert an enrollment. The (user_id, course_id) uniqueness constraint makes
/// the insert authoritative: a concurrent duplicate surfaces as AlreadyExists
/// rather than a second row.
pub async fn insert(pool: &SqlitePool, user_id: i64, course_id: i64) -> Result<Enrollment> {
    let enrolled_at = Utc::now();
    let result = sqlx::query(
        "INSERT INTO enrollments (user_id, course_id, enrolled_at) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(enrolled_at)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(Enrollment {
            id: done.last_insert_rowid(),
            user_id,
            course_id,
            enrolled_at,
        }),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(
            AppError::AlreadyExists("You are already enrolled in this course.".to_string()),
        ),
        Err(err) => Err(err.into()),
    }
}

/// Courses a user is enrolled in, via an explicit join (most recent first).
pub async fn list_courses_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        r#"
        SELECT c.id, c.title, c.description, c.image, c.category, c.level, c.featured, c.created_at
        FROM courses c
        JOIN enrollments e ON e.course_id = c.id
        WHERE e.user_id = ?
        ORDER BY e.enrolled_at DESC, e.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(courses)
}
