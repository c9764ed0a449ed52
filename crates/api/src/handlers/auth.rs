//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tanmia_core::error::CoreError;
use tanmia_db::models::user::UserResponse;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, AUTH_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with username + password. Returns the JWT in the body and
/// also sets it as an HttpOnly cookie for browser clients. Unknown username
/// and wrong password produce the identical 401 so the endpoint leaks no
/// account-existence signal.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Identifiants invalides".into()));

    let user = state
        .store
        .get_user_by_username(&input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let token = generate_token(user.id, &user.username, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_in = state.config.jwt.expiry_secs();
    let cookie = format!(
        "{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={expires_in}"
    );

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let body = LoginResponse {
        token,
        expires_in,
        user: UserResponse::from(&user),
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/auth/logout
///
/// Clears the auth cookie. Tokens are not tracked server-side, so this is
/// client-artifact invalidation only.
pub async fn logout(user: AuthUser) -> impl IntoResponse {
    tracing::info!(user_id = user.user_id, "User logged out");
    let cookie = format!("{AUTH_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    (
        [(SET_COOKIE, cookie)],
        Json(json!({ "message": "Déconnexion réussie" })),
    )
}

/// GET /api/auth/me
///
/// Re-resolve the caller from storage. A valid token for a since-deleted
/// account yields 401, not a stale identity.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let user = state
        .store
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Le compte n'existe plus".into())))?;

    Ok(Json(json!({ "user": UserResponse::from(&user) })))
}
