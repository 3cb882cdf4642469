use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::models::User,
    error::{AppError, Result},
};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, is_admin, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// Email is unique, so at most one row can match.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, is_admin, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO users (name, email, password_hash, is_admin, created_at) VALUES (?, ?, ?, 0, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_name(
    conn: &mut sqlx::SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<()> {
    sqlx::query("UPDATE users SET name = ? WHERE id = ?")
        .bind(name)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update_password(
    conn: &mut sqlx::SqliteConnection,
    user_id: i64,
    password_hash: &str,
) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}
