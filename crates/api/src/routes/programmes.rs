//! Route definitions for the `/programmes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::programmes;
use crate::state::AppState;

/// Routes mounted at `/programmes`.
///
/// Reads require any authenticated role; mutations require editeur or admin
/// (enforced by handler extractors).
///
/// ```text
/// GET    /         -> list_programmes
/// POST   /         -> create_programme
/// GET    /{id}     -> get_programme
/// PUT    /{id}     -> update_programme
/// DELETE /{id}     -> delete_programme (cascades to projets)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(programmes::list_programmes).post(programmes::create_programme),
        )
        .route(
            "/{id}",
            get(programmes::get_programme)
                .put(programmes::update_programme)
                .delete(programmes::delete_programme),
        )
}
