pub mod auth;
pub mod health;
pub mod programmes;
pub mod projets;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/logout                 logout (requires auth)
/// /auth/me                     current account (requires auth)
///
/// /users                       list, create (admin only)
/// /users/{id}                  delete (admin only)
///
/// /programmes                  list (decideur+), create (editeur+)
/// /programmes/{id}             get (decideur+), update, delete (editeur+)
///
/// /projets                     list ?programmeId= (decideur+), create (editeur+)
/// /projets/{id}                get (decideur+), update, delete (editeur+)
///
/// /stats                       aggregated figures (decideur+)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout, me).
        .nest("/auth", auth::router())
        // Account management (admin only, enforced by handler extractors).
        .nest("/users", users::router())
        // Programmes and their projets.
        .nest("/programmes", programmes::router())
        .nest("/projets", projets::router())
        // Aggregated dashboard figures.
        .nest("/stats", stats::router())
}
