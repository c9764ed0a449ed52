//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Because these run as `FromRequestParts`
//! extractors, authorization is always decided before the JSON body is
//! parsed, so an unauthorized caller never learns whether their payload was
//! valid.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tanmia_core::error::CoreError;
use tanmia_core::roles::{ROLE_ADMIN, ROLE_EDITEUR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Rôle admin requis".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `editeur` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// Gates every Programme and Projet mutation.
pub struct RequireEditeur(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditeur {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_EDITEUR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Rôle éditeur ou admin requis".into(),
            )));
        }
        Ok(RequireEditeur(user))
    }
}

/// Requires any authenticated user (`decideur`, `editeur`, or `admin`).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly so route
/// definitions read as "this endpoint is open to every role, decideur
/// included".
pub struct RequireDecideur(pub AuthUser);

impl FromRequestParts<AppState> for RequireDecideur {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireDecideur(user))
    }
}
