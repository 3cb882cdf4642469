use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        self,
        models::{Article, Course},
    },
    error::Result,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: SearchResults,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub courses: Vec<Course>,
    pub articles: Vec<Article>,
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let (courses, articles) = if query.q.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        db::search::search(&state.db.pool, &query.q).await?
    };

    Ok(Json(SearchResponse {
        query: query.q,
        results: SearchResults { courses, articles },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_state;

    async fn run(state: &AppState, q: &str) -> SearchResponse {
        search(
            State(state.clone()),
            Query(SearchQuery { q: q.to_string() }),
        )
        .await
        .unwrap()
        .0
    }

    #[tokio::test]
    async fn description_only_match_returns_course_and_no_articles() {
        let state = test_state().await;

        // "firewalls" appears only in the Network Security Fundamentals
        // description.
        let response = run(&state, "firewalls").await;
        assert_eq!(response.results.courses.len(), 1);
        assert_eq!(
            response.results.courses[0].title,
            "Network Security Fundamentals"
        );
        assert!(response.results.articles.is_empty());
    }

    #[tokio::test]
    async fn matching_is_case_insensitive() {
        let state = test_state().await;

        let upper = run(&state, "CYBERSECURITY").await;
        let lower = run(&state, "cybersecurity").await;
        assert!(!upper.results.courses.is_empty());
        assert_eq!(upper.results.courses.len(), lower.results.courses.len());
        assert_eq!(upper.results.articles.len(), lower.results.articles.len());
    }

    #[tokio::test]
    async fn both_entity_kinds_are_searched() {
        let state = test_state().await;

        // "OWASP" appears in an article title, "Python" in a course title.
        let response = run(&state, "owasp").await;
        assert!(response.results.courses.is_empty());
        assert_eq!(response.results.articles.len(), 1);

        let response = run(&state, "python").await;
        assert_eq!(response.results.courses.len(), 1);
    }

    #[tokio::test]
    async fn empty_query_yields_empty_results() {
        let state = test_state().await;

        let response = run(&state, "").await;
        assert!(response.results.courses.is_empty());
        assert!(response.results.articles.is_empty());
        assert_eq!(response.query, "");
    }
}
