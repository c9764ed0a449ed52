//! Route definitions for the `/users` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /         -> list_users
/// POST   /         -> create_user
/// DELETE /{id}     -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", delete(users::delete_user))
}
