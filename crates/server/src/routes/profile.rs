use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db,
    error::{AppError, Result},
    middleware::auth::AuthUser,
    routes::auth::{hash_password, verify_password, UserResponse},
    routes::MessageResponse,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(view_profile).put(update_profile))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

async fn view_profile(user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// Update name and/or password. All validation happens before any write and
/// the writes share one transaction, so a rejected password change never
/// commits a partial name change.
async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>> {
    let stored = db::users::find_by_id(&state.db.pool, user.id).await?;

    let new_name = match body.name {
        Some(name) if !name.trim().is_empty() && name != stored.name => Some(name),
        _ => None,
    };

    let new_password_hash = match (
        body.current_password,
        body.new_password,
        body.confirm_password,
    ) {
        (Some(current), Some(new), Some(confirm)) => {
            if !verify_password(&current, &stored.password_hash)? {
                return Err(AppError::Validation(
                    "Current password is incorrect.".to_string(),
                ));
            }
            if new != confirm {
                return Err(AppError::Validation(
                    "New passwords do not match.".to_string(),
                ));
            }
            if new.len() < 8 {
                return Err(AppError::Validation(
                    "New password must be at least 8 characters long.".to_string(),
                ));
            }
            Some(hash_password(&new)?)
        }
        _ => None,
    };

    let mut tx = state.db.pool.begin().await?;
    if let Some(name) = &new_name {
        db::users::update_name(&mut *tx, user.id, name).await?;
    }
    if let Some(hash) = &new_password_hash {
        db::users::update_password(&mut *tx, user.id, hash).await?;
    }
    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{test_state, test_user};

    #[tokio::test]
    async fn name_can_be_changed() {
        let state = test_state().await;

        update_profile(
            State(state.clone()),
            test_user(),
            Json(UpdateProfileRequest {
                name: Some("Renamed User".to_string()),
                current_password: None,
                new_password: None,
                confirm_password: None,
            }),
        )
        .await
        .unwrap();

        let stored = db::users::find_by_id(&state.db.pool, 2).await.unwrap();
        assert_eq!(stored.name, "Renamed User");
    }

    #[tokio::test]
    async fn password_change_requires_the_current_password() {
        let state = test_state().await;
        let before = db::users::find_by_id(&state.db.pool, 2).await.unwrap();

        let err = update_profile(
            State(state.clone()),
            test_user(),
            Json(UpdateProfileRequest {
                name: None,
                current_password: Some("wrong-password".to_string()),
                new_password: Some("NewPassword1".to_string()),
                confirm_password: Some("NewPassword1".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let after = db::users::find_by_id(&state.db.pool, 2).await.unwrap();
        assert_eq!(before.password_hash, after.password_hash);
    }

    #[tokio::test]
    async fn rejected_password_change_commits_nothing() {
        let state = test_state().await;

        // Name change rides along with a password change that fails
        // validation; neither may land.
        let err = update_profile(
            State(state.clone()),
            test_user(),
            Json(UpdateProfileRequest {
                name: Some("Should Not Stick".to_string()),
                current_password: Some("Password123".to_string()),
                new_password: Some("short".to_string()),
                confirm_password: Some("short".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored = db::users::find_by_id(&state.db.pool, 2).await.unwrap();
        assert_eq!(stored.name, "Test User");
    }

    #[tokio::test]
    async fn new_password_authenticates() {
        let state = test_state().await;

        update_profile(
            State(state.clone()),
            test_user(),
            Json(UpdateProfileRequest {
                name: None,
                current_password: Some("Password123".to_string()),
                new_password: Some("BrandNewPass1".to_string()),
                confirm_password: Some("BrandNewPass1".to_string()),
            }),
        )
        .await
        .unwrap();

        let stored = db::users::find_by_id(&state.db.pool, 2).await.unwrap();
        assert!(verify_password("BrandNewPass1", &stored.password_hash).unwrap());
        assert!(!verify_password("Password123", &stored.password_hash).unwrap());
    }
}
