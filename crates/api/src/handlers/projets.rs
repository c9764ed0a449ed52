//! Handlers for the `/projets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tanmia_core::error::CoreError;
use tanmia_core::types::DbId;
use tanmia_db::models::projet::{CreateProjet, Projet, UpdateProjet};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireDecideur, RequireEditeur};
use crate::state::AppState;

/// Query parameters for `GET /projets`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjetListQuery {
    /// Restrict the listing to one programme.
    pub programme_id: Option<DbId>,
}

/// GET /api/projets?programmeId={id}
pub async fn list_projets(
    State(state): State<AppState>,
    RequireDecideur(_user): RequireDecideur,
    Query(query): Query<ProjetListQuery>,
) -> AppResult<Json<Vec<Projet>>> {
    let projets = match query.programme_id {
        Some(programme_id) => state.store.list_projets_by_programme(programme_id).await?,
        None => state.store.list_projets().await?,
    };
    Ok(Json(projets))
}

/// GET /api/projets/{id}
pub async fn get_projet(
    State(state): State<AppState>,
    RequireDecideur(_user): RequireDecideur,
    Path(id): Path<DbId>,
) -> AppResult<Json<Projet>> {
    let projet = state
        .store
        .get_projet(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Projet",
            id,
        })?;
    Ok(Json(projet))
}

/// POST /api/projets
///
/// The referenced programme must exist; a dangling `programmeId` is a
/// validation failure, not a 404 (the projet is the resource being
/// addressed, not the programme).
pub async fn create_projet(
    State(state): State<AppState>,
    RequireEditeur(user): RequireEditeur,
    Json(input): Json<CreateProjet>,
) -> AppResult<(StatusCode, Json<Projet>)> {
    input.validate().map_err(CoreError::Validation)?;
    ensure_programme_exists(&state, input.programme_id).await?;

    let projet = state.store.create_projet(&input).await?;
    tracing::info!(projet_id = projet.id, user_id = user.user_id, "Projet created");
    Ok((StatusCode::CREATED, Json(projet)))
}

/// PUT /api/projets/{id}
pub async fn update_projet(
    State(state): State<AppState>,
    RequireEditeur(_user): RequireEditeur,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjet>,
) -> AppResult<Json<Projet>> {
    let existing = state
        .store
        .get_projet(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Projet",
            id,
        })?;

    input.validate().map_err(CoreError::Validation)?;
    input
        .check_ordering_against(&existing)
        .map_err(CoreError::Validation)?;

    // Moving the projet to another programme re-checks referential integrity.
    if let Some(programme_id) = input.programme_id {
        ensure_programme_exists(&state, programme_id).await?;
    }

    let updated = state
        .store
        .update_projet(id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Projet",
            id,
        })?;
    Ok(Json(updated))
}

/// DELETE /api/projets/{id}
pub async fn delete_projet(
    State(state): State<AppState>,
    RequireEditeur(user): RequireEditeur,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_projet(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Projet",
            id,
        }));
    }

    tracing::info!(projet_id = id, user_id = user.user_id, "Projet deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fail with a `programmeId` field error when the programme is missing.
async fn ensure_programme_exists(state: &AppState, programme_id: DbId) -> AppResult<()> {
    if state.store.get_programme(programme_id).await?.is_none() {
        return Err(AppError::Core(CoreError::invalid_field(
            "programmeId",
            format!("le programme {programme_id} n'existe pas"),
        )));
    }
    Ok(())
}
