use sqlx::sqlite::SqlitePoolOptions;

use crate::{config::Config, db, middleware::auth::AuthUser, AppState};

/// Fresh application state over an in-memory database, migrated and seeded.
/// A single connection keeps every query on the same in-memory instance.
pub async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    db::seed::seed_if_empty(&pool).await.expect("seed data");

    AppState {
        db: db::Database { pool },
        config: Config {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
        },
    }
}

/// The seeded non-admin user (id 2, user@example.com, password "Password123").
pub fn test_user() -> AuthUser {
    AuthUser {
        id: 2,
        name: "Test User".to_string(),
        email: "user@example.com".to_string(),
        is_admin: false,
    }
}
