use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{self, models::Course},
    error::Result,
    middleware::auth::OptionalUserId,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/:id", get(course_detail))
}

#[derive(Debug, Deserialize)]
pub struct CoursesQuery {
    pub category: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    pub selected_category: String,
    pub selected_level: String,
}

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub is_enrolled: bool,
    pub related_courses: Vec<Course>,
}

// "all" (or an absent parameter) means unfiltered.
fn facet_filter(selected: &Option<String>) -> Option<&str> {
    match selected.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(value),
    }
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CoursesQuery>,
) -> Result<Json<CoursesResponse>> {
    let category = facet_filter(&query.category);
    let level = facet_filter(&query.level);

    let courses = db::courses::list_filtered(&state.db.pool, category, level).await?;

    // Facet sets ignore the active filters so every selection stays visible.
    let categories = db::courses::distinct_categories(&state.db.pool).await?;
    let levels = db::courses::distinct_levels(&state.db.pool).await?;

    Ok(Json(CoursesResponse {
        courses,
        categories,
        levels,
        selected_category: query.category.unwrap_or_else(|| "all".to_string()),
        selected_level: query.level.unwrap_or_else(|| "all".to_string()),
    }))
}

async fn course_detail(
    State(state): State<AppState>,
    OptionalUserId(user_id): OptionalUserId,
    Path(id): Path<i64>,
) -> Result<Json<CourseDetailResponse>> {
    let course = db::courses::find_by_id(&state.db.pool, id).await?;

    let is_enrolled = match user_id {
        Some(user_id) => db::enrollments::exists(&state.db.pool, user_id, id).await?,
        None => false,
    };

    let related_courses =
        db::courses::list_related(&state.db.pool, &course.category, course.id, 3).await?;

    Ok(Json(CourseDetailResponse {
        course,
        is_enrolled,
        related_courses,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, test_util::test_state};

    fn titles(courses: &[Course]) -> Vec<&str> {
        let mut titles: Vec<&str> = courses.iter().map(|c| c.title.as_str()).collect();
        titles.sort();
        titles
    }

    async fn list(state: &AppState, category: Option<&str>, level: Option<&str>) -> CoursesResponse {
        list_courses(
            State(state.clone()),
            Query(CoursesQuery {
                category: category.map(String::from),
                level: level.map(String::from),
            }),
        )
        .await
        .unwrap()
        .0
    }

    #[tokio::test]
    async fn filters_apply_conjunctively() {
        let state = test_state().await;

        let response = list(&state, Some("cybersecurity"), Some("beginner")).await;
        assert_eq!(
            titles(&response.courses),
            vec![
                "Introduction to Cybersecurity",
                "Network Security Fundamentals"
            ]
        );

        let response = list(&state, Some("software_engineering"), None).await;
        assert_eq!(
            titles(&response.courses),
            vec!["Full Stack Web Development", "Python for Data Science"]
        );

        let response = list(&state, None, Some("advanced")).await;
        assert_eq!(titles(&response.courses), vec!["Advanced Penetration Testing"]);

        let response = list(&state, Some("all"), Some("all")).await;
        assert_eq!(response.courses.len(), 5);
    }

    #[tokio::test]
    async fn facet_sets_ignore_active_filters() {
        let state = test_state().await;

        let response = list(&state, Some("cybersecurity"), Some("beginner")).await;
        assert_eq!(
            response.categories,
            vec!["cybersecurity", "software_engineering"]
        );
        assert_eq!(response.levels, vec!["advanced", "beginner", "intermediate"]);
        assert_eq!(response.selected_category, "cybersecurity");
        assert_eq!(response.selected_level, "beginner");
    }

    #[tokio::test]
    async fn detail_reports_enrollment_and_related() {
        let state = test_state().await;

        let anonymous = course_detail(State(state.clone()), OptionalUserId(None), Path(1))
            .await
            .unwrap();
        assert!(!anonymous.is_enrolled);
        assert!(anonymous.related_courses.len() <= 3);
        assert!(anonymous.related_courses.iter().all(|c| c.id != 1));
        assert!(anonymous
            .related_courses
            .iter()
            .all(|c| c.category == "cybersecurity"));

        db::enrollments::insert(&state.db.pool, 2, 1).await.unwrap();
        let enrolled = course_detail(State(state), OptionalUserId(Some(2)), Path(1))
            .await
            .unwrap();
        assert!(enrolled.is_enrolled);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let state = test_state().await;

        let err = course_detail(State(state), OptionalUserId(None), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
