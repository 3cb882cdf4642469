use std::net::SocketAddr;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod middleware;
mod routes;
#[cfg(test)]
mod test_util;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
    pub config: config::Config,
}

pub fn app(state: AppState) -> Router {
    // Routes that require a session
    let protected_routes = Router::new()
        .nest("/dashboard", routes::dashboard::router())
        .nest("/profile", routes::profile::router())
        .nest("/enroll", routes::enroll::router())
        .nest("/learning", routes::learning::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let api_router = Router::new()
        .nest("/auth", routes::auth::router())
        .nest("/home", routes::home::router())
        .nest("/courses", routes::courses::router())
        .nest("/articles", routes::articles::router())
        .nest("/search", routes::search::router())
        .merge(protected_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnhub_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env();

    // Initialize database
    let db = db::Database::connect(&config.database_url).await?;
    db.run_migrations().await?;
    db::seed::seed_if_empty(&db.pool).await?;

    let state = AppState {
        db,
        config: config.clone(),
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
