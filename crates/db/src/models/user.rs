//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tanmia_core::roles::{is_role, ROLES};
use tanmia_core::types::{DbId, Timestamp};
use tanmia_core::validation::FieldErrors;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a user row (password already hashed).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Request-shaped user creation payload, validated before hashing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

impl CreateUserRequest {
    /// Check every field and return all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.push("username", "le nom d'utilisateur est requis");
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                format!("le mot de passe doit contenir au moins {MIN_PASSWORD_LENGTH} caractères"),
            );
        }
        if !is_role(&self.role) {
            errors.push(
                "role",
                format!("rôle invalide, attendu l'un de: {}", ROLES.join(", ")),
            );
        }

        errors.into_result()
    }
}
