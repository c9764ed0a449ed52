//! Route definitions for the `/projets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projets;
use crate::state::AppState;

/// Routes mounted at `/projets`.
///
/// Reads require any authenticated role; mutations require editeur or admin
/// (enforced by handler extractors).
///
/// ```text
/// GET    /         -> list_projets (?programmeId= filter)
/// POST   /         -> create_projet
/// GET    /{id}     -> get_projet
/// PUT    /{id}     -> update_projet
/// DELETE /{id}     -> delete_projet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projets::list_projets).post(projets::create_projet))
        .route(
            "/{id}",
            get(projets::get_projet)
                .put(projets::update_projet)
                .delete(projets::delete_projet),
        )
}
