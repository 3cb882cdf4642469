use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::{
        self,
        models::{Article, Course},
    },
    error::Result,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured_courses: Vec<Course>,
    pub recent_articles: Vec<Article>,
}

async fn index(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let featured_courses = db::courses::list_featured(&state.db.pool, 3).await?;
    let recent_articles = db::articles::list_filtered(&state.db.pool, None)
        .await?
        .into_iter()
        .take(4)
        .collect();

    Ok(Json(HomeResponse {
        featured_courses,
        recent_articles,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_state;

    #[tokio::test]
    async fn home_caps_featured_and_recent() {
        let state = test_state().await;

        let response = index(State(state)).await.unwrap();
        assert_eq!(response.featured_courses.len(), 3);
        assert!(response.featured_courses.iter().all(|c| c.featured));
        assert_eq!(response.recent_articles.len(), 4);
    }
}
