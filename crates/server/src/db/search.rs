use sqlx::SqlitePool;

use crate::{
    db::models::{Article, Course},
    error::Result,
};

/// Case-insensitive substring match over courses (title/description) and
/// articles (title/content). Both result sets are returned together.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<(Vec<Course>, Vec<Article>)> {
    let pattern = format!("%{}%", query.to_lowercase());

    let courses = sqlx::query_as::<_, Course>(
        "SELECT id, title, description, image, category, level, featured, created_at \
         FROM courses WHERE lower(title) LIKE ? OR lower(description) LIKE ? \
         ORDER BY id ASC",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    let articles = sqlx::query_as::<_, Article>(
        "SELECT id, title, content, image, category, created_at \
         FROM articles WHERE lower(title) LIKE ? OR lower(content) LIKE ? \
         ORDER BY id ASC",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok((courses, articles))
}
