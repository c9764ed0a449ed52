//! Handlers for the `/programmes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tanmia_core::error::CoreError;
use tanmia_core::types::DbId;
use tanmia_db::models::programme::{CreateProgramme, Programme, UpdateProgramme};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireDecideur, RequireEditeur};
use crate::state::AppState;

/// GET /api/programmes
pub async fn list_programmes(
    State(state): State<AppState>,
    RequireDecideur(_user): RequireDecideur,
) -> AppResult<Json<Vec<Programme>>> {
    Ok(Json(state.store.list_programmes().await?))
}

/// GET /api/programmes/{id}
pub async fn get_programme(
    State(state): State<AppState>,
    RequireDecideur(_user): RequireDecideur,
    Path(id): Path<DbId>,
) -> AppResult<Json<Programme>> {
    let programme = state
        .store
        .get_programme(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Programme",
            id,
        })?;
    Ok(Json(programme))
}

/// POST /api/programmes
pub async fn create_programme(
    State(state): State<AppState>,
    RequireEditeur(user): RequireEditeur,
    Json(input): Json<CreateProgramme>,
) -> AppResult<(StatusCode, Json<Programme>)> {
    input.validate().map_err(CoreError::Validation)?;

    let programme = state.store.create_programme(&input).await?;
    tracing::info!(programme_id = programme.id, user_id = user.user_id, "Programme created");
    Ok((StatusCode::CREATED, Json(programme)))
}

/// PUT /api/programmes/{id}
///
/// Partial update: omitted fields keep their value. The amount-ordering
/// invariant is re-checked against the merge with the existing row, so a
/// stored total cannot be lowered below a stored participation (or vice
/// versa) one field at a time.
pub async fn update_programme(
    State(state): State<AppState>,
    RequireEditeur(_user): RequireEditeur,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgramme>,
) -> AppResult<Json<Programme>> {
    let existing = state
        .store
        .get_programme(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Programme",
            id,
        })?;

    input.validate().map_err(CoreError::Validation)?;
    input
        .check_ordering_against(&existing)
        .map_err(CoreError::Validation)?;

    let updated = state
        .store
        .update_programme(id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Programme",
            id,
        })?;
    Ok(Json(updated))
}

/// DELETE /api/programmes/{id}
///
/// Also deletes every projet of the programme, atomically.
pub async fn delete_programme(
    State(state): State<AppState>,
    RequireEditeur(user): RequireEditeur,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_programme(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Programme",
            id,
        }));
    }

    tracing::info!(programme_id = id, user_id = user.user_id, "Programme deleted (with projets)");
    Ok(StatusCode::NO_CONTENT)
}
