use sqlx::SqlitePool;

use crate::{
    db::models::Article,
    error::{AppError, Result},
};

const ARTICLE_COLUMNS: &str = "id, title, content, image, category, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Article> {
    let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?");
    sqlx::query_as::<_, Article>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
}

/// Newest first, optionally restricted to one category.
pub async fn list_filtered(pool: &SqlitePool, category: Option<&str>) -> Result<Vec<Article>> {
    let articles = match category {
        Some(category) => {
            let sql = format!(
                "SELECT {ARTICLE_COLUMNS} FROM articles WHERE category = ? \
                 ORDER BY created_at DESC, id ASC"
            );
            sqlx::query_as::<_, Article>(&sql)
                .bind(category)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC, id ASC"
            );
            sqlx::query_as::<_, Article>(&sql).fetch_all(pool).await?
        }
    };

    Ok(articles)
}

pub async fn list_related(
    pool: &SqlitePool,
    category: &str,
    exclude_id: i64,
    limit: i64,
) -> Result<Vec<Article>> {
    let sql = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE category = ? AND id != ? LIMIT ?"
    );
    Ok(sqlx::query_as::<_, Article>(&sql)
        .bind(category)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}

pub async fn distinct_categories(pool: &SqlitePool) -> Result<Vec<String>> {
    Ok(
        sqlx::query_scalar("SELECT DISTINCT category FROM articles ORDER BY category")
            .fetch_all(pool)
            .await?,
    )
}
