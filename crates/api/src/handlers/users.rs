//! Handlers for the `/users` resource (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tanmia_core::error::CoreError;
use tanmia_core::types::DbId;
use tanmia_db::models::user::{CreateUser, CreateUserRequest, UserResponse};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/users
///
/// List every account as its public projection (no hashes).
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /api/users
///
/// Create an account. The password is hashed before it ever reaches the
/// storage layer; a duplicate username surfaces as 409.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate().map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            username: input.username,
            password_hash,
            role: input.role,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// DELETE /api/users/{id}
///
/// Admins cannot delete their own account, so the system always keeps at
/// least the caller able to administer it.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Impossible de supprimer votre propre compte".into(),
        ));
    }

    let deleted = state.store.delete_user(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Utilisateur",
            id,
        }));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(Json(json!({ "message": "Utilisateur supprimé" })))
}
