use sqlx::SqlitePool;

use crate::{
    db::models::Course,
    error::{AppError, Result},
};

const COURSE_COLUMNS: &str =
    "id, title, description, image, category, level, featured, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Course> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?");
    sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
}

/// List courses with optional conjunctive category/level filters. `None`
/// means unfiltered (the route layer decodes the "all" sentinel to `None`).
pub async fn list_filtered(
    pool: &SqlitePool,
    category: Option<&str>,
    level: Option<&str>,
) -> Result<Vec<Course>> {
    let mut sql = format!("SELECT {COURSE_COLUMNS} FROM courses");
    let mut clauses = Vec::new();
    if category.is_some() {
        clauses.push("category = ?");
    }
    if level.is_some() {
        clauses.push("level = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id ASC");

    let mut query = sqlx::query_as::<_, Course>(&sql);
    if let Some(category) = category {
        query = query.bind(category);
    }
    if let Some(level) = level {
        query = query.bind(level);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn list_featured(pool: &SqlitePool, limit: i64) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE featured = 1 ORDER BY created_at DESC, id ASC LIMIT ?"
    );
    Ok(sqlx::query_as::<_, Course>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

/// Courses in the same category, excluding the course itself.
pub async fn list_related(
    pool: &SqlitePool,
    category: &str,
    exclude_id: i64,
    limit: i64,
) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE category = ? AND id != ? LIMIT ?"
    );
    Ok(sqlx::query_as::<_, Course>(&sql)
        .bind(category)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

/// Recommendation fallback: courses the user is not enrolled in.
pub async fn list_not_enrolled(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses \
         WHERE id NOT IN (SELECT course_id FROM enrollments WHERE user_id = ?) \
         ORDER BY id ASC LIMIT ?"
    );
    Ok(sqlx::query_as::<_, Course>(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

// Facet sets are computed over the whole table, ignoring any active filters.
pub async fn distinct_categories(pool: &SqlitePool) -> Result<Vec<String>> {
    Ok(
        sqlx::query_scalar("SELECT DISTINCT category FROM courses ORDER BY category")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn distinct_levels(pool: &SqlitePool) -> Result<Vec<String>> {
    Ok(
        sqlx::query_scalar("SELECT DISTINCT level FROM courses ORDER BY level")
            .fetch_all(pool)
            .await?,
    )
}
