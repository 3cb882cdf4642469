use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::{self, models::Course},
    error::Result,
    middleware::auth::AuthUser,
    routes::auth::UserResponse,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: UserResponse,
    pub enrolled_courses: Vec<Course>,
    pub recommended_courses: Vec<Course>,
}

async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>> {
    let enrolled_courses = db::enrollments::list_courses_for_user(&state.db.pool, user.id).await?;
    let recommended_courses = db::courses::list_not_enrolled(&state.db.pool, user.id, 2).await?;

    Ok(Json(DashboardResponse {
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
        enrolled_courses,
        recommended_courses,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{test_state, test_user};

    #[tokio::test]
    async fn enrolled_courses_are_never_recommended() {
        let state = test_state().await;

        db::enrollments::insert(&state.db.pool, 2, 1).await.unwrap();

        let response = dashboard(State(state), test_user()).await.unwrap();
        assert!(response.enrolled_courses.iter().any(|c| c.id == 1));
        assert!(response.recommended_courses.iter().all(|c| c.id != 1));
        assert!(response.recommended_courses.len() <= 2);
    }

    #[tokio::test]
    async fn fresh_user_has_no_enrollments() {
        let state = test_state().await;

        let response = dashboard(State(state), test_user()).await.unwrap();
        assert!(response.enrolled_courses.is_empty());
        assert_eq!(response.recommended_courses.len(), 2);
    }
}
