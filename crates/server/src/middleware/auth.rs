use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{db, error::AppError, routes::auth::Claims, AppState};

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    // The session subject must still exist; a deleted user is prompted to
    // log in again.
    let user = db::users::find_by_id(&state.db.pool, token_data.claims.sub)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.name,
        email: user.email,
        is_admin: user.is_admin,
    });

    Ok(next.run(request).await)
}

// Extractor for getting the authenticated user from request extensions
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Current user id when a valid bearer token accompanies an otherwise public
/// request (e.g. the enrollment flag on a course detail page).
pub struct OptionalUserId(pub Option<i64>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUserId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = bearer_token(&parts.headers)
            .and_then(|token| {
                decode::<Claims>(
                    token,
                    &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
                    &Validation::default(),
                )
                .ok()
            })
            .map(|data| data.claims.sub);

        Ok(Self(user_id))
    }
}
