use axum::{
    extract::{Path, Query, State},
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
    Router::new()
        .route("/", get(list_articles))
        .route("/:id", get(article_detail))
}

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
    pub categories: Vec<String>,
    pub selected_category: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    pub article: Article,
    pub related_articles: Vec<Article>,
    pub popular_courses: Vec<Course>,
}

async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ArticlesResponse>> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(value),
    };

    let articles = db::articles::list_filtered(&state.db.pool, category).await?;
    let categories = db::articles::distinct_categories(&state.db.pool).await?;

    Ok(Json(ArticlesResponse {
        articles,
        categories,
        selected_category: query.category.unwrap_or_else(|| "all".to_string()),
    }))
}

async fn article_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleDetailResponse>> {
    let article = db::articles::find_by_id(&state.db.pool, id).await?;

    let related_articles =
        db::articles::list_related(&state.db.pool, &article.category, article.id, 2).await?;
    let popular_courses = db::courses::list_featured(&state.db.pool, 2).await?;

    Ok(Json(ArticleDetailResponse {
        article,
        related_articles,
        popular_courses,
    }))
}
