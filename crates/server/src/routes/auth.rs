use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{
    db,
    error::{AppError, Result},
    routes::MessageResponse,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user id
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// A remembered session is valid for 30 days; the default is one day.
pub fn create_token(user_id: i64, remember: bool, secret: &str) -> Result<String> {
    let days = if remember { 30 } else { 1 };
    let expiration = Utc::now()
        .checked_add_signed(chrono::Duration::days(days))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Internal("Failed to create token".to_string()))
}

async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<SignupResponse>> {
    if body.name.trim().is_empty()
        || body.email.trim().is_empty()
        || body.password.is_empty()
        || body.confirm_password.is_empty()
    {
        return Err(AppError::Validation("All fields are required.".to_string()));
    }
    if !body.email.contains('@') {
        return Err(AppError::Validation("Invalid email address.".to_string()));
    }
    if body.password != body.confirm_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }
    if body.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long.".to_string(),
        ));
    }

    if db::users::find_by_email(&state.db.pool, &body.email)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyExists(
            "Email address already exists.".to_string(),
        ));
    }

    let password_hash = hash_password(&body.password)?;
    let user_id = db::users::insert(&state.db.pool, &body.name, &body.email, &password_hash).await?;

    Ok(Json(SignupResponse {
        message: "Account created successfully! Please log in.".to_string(),
        user: UserResponse {
            id: user_id,
            name: body.name,
            email: body.email,
        },
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    // One generic failure for both unknown email and wrong password, so the
    // response does not reveal which accounts exist.
    let user = db::users::find_by_email(&state.db.pool, &body.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_token(user.id, body.remember, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        message: "Login successful!".to_string(),
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

// Sessions are stateless tokens; logout is the client discarding its token.
async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "You have been logged out.".to_string(),
    })
}

// Stub: confirms the account exists but no mail is actually sent.
async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    if body.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required.".to_string()));
    }

    if db::users::find_by_email(&state.db.pool, &body.email)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(
            "No account found with that email address.".to_string(),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Password reset link has been sent to your email.".to_string(),
    }))
}

// Stub: validates the new password but performs no token lookup.
async fn reset_password(
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    if body.new_password.is_empty() || body.confirm_new_password.is_empty() {
        return Err(AppError::Validation("All fields are required.".to_string()));
    }
    if body.new_password != body.confirm_new_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }
    if body.new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long.".to_string(),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully. Please log in with your new password."
            .to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_state;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn signup_body(email: &str) -> SignupRequest {
        SignupRequest {
            name: "New User".to_string(),
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
            confirm_password: "hunter2hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_stores_a_hash_and_the_password_logs_in() {
        let state = test_state().await;

        signup(State(state.clone()), Json(signup_body("new@example.com")))
            .await
            .unwrap();

        let stored = db::users::find_by_email(&state.db.pool, "new@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$argon2"));
        assert_ne!(stored.password_hash, "hunter2hunter2");

        let response = login(
            State(state),
            Json(LoginRequest {
                email: "new@example.com".to_string(),
                password: "hunter2hunter2".to_string(),
                remember: false,
            }),
        )
        .await
        .unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.user.email, "new@example.com");
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let state = test_state().await;

        let before = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db.pool)
            .await
            .unwrap();

        // user@example.com is seeded
        let err = signup(State(state.clone()), Json(signup_body("user@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let after = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db.pool)
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn signup_enforces_password_policy() {
        let state = test_state().await;

        let mut body = signup_body("short@example.com");
        body.password = "short".to_string();
        body.confirm_password = "short".to_string();
        let err = signup(State(state.clone()), Json(body)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut body = signup_body("mismatch@example.com");
        body.confirm_password = "somethingelse".to_string();
        let err = signup(State(state), Json(body)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn login_failures_share_one_generic_message() {
        let state = test_state().await;

        let unknown = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Password123".to_string(),
                remember: false,
            }),
        )
        .await
        .unwrap_err();

        let wrong_password = login(
            State(state),
            Json(LoginRequest {
                email: "user@example.com".to_string(),
                password: "not-the-password".to_string(),
                remember: false,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(unknown.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn remembered_tokens_live_longer() {
        let short = create_token(1, false, "secret").unwrap();
        let long = create_token(1, true, "secret").unwrap();

        let mut validation = Validation::default();
        validation.validate_exp = false;
        let decode_exp = |token: &str| {
            decode::<Claims>(token, &DecodingKey::from_secret(b"secret"), &validation)
                .unwrap()
                .claims
                .exp
        };

        let day = 24 * 60 * 60;
        let difference = decode_exp(&long) - decode_exp(&short);
        assert!(difference >= 28 * day && difference <= 30 * day);
    }

    #[tokio::test]
    async fn forgot_password_requires_a_known_account() {
        let state = test_state().await;

        let err = forgot_password(
            State(state.clone()),
            Json(ForgotPasswordRequest {
                email: "ghost@example.com".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let ok = forgot_password(
            State(state),
            Json(ForgotPasswordRequest {
                email: "user@example.com".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(ok.message, "Password reset link has been sent to your email.");
    }
}
