//! Handler for the aggregated `/stats` endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tanmia_core::montant::sum_montants;
use tanmia_core::referentiel::ETAT_EN_COURS;

use crate::error::AppResult;
use crate::middleware::rbac::RequireDecideur;
use crate::state::AppState;

/// Aggregated dashboard figures, recomputed from scratch on every call.
///
/// The budget sums are exact decimals serialized as strings, same as the
/// amount fields they aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_programmes: usize,
    pub total_projets: usize,
    /// Projets whose état d'avancement is "En cours".
    pub projets_actifs: usize,
    pub total_budget: String,
    pub total_participation: String,
}

/// GET /api/stats
pub async fn get_stats(
    State(state): State<AppState>,
    RequireDecideur(_user): RequireDecideur,
) -> AppResult<Json<StatsResponse>> {
    let programmes = state.store.list_programmes().await?;
    let projets = state.store.list_projets().await?;

    let projets_actifs = projets
        .iter()
        .filter(|p| p.etat_avancement == ETAT_EN_COURS)
        .count();

    let total_budget = sum_montants(programmes.iter().map(|p| p.montant_global.as_deref()));
    let total_participation =
        sum_montants(programmes.iter().map(|p| p.participation_region.as_deref()));

    Ok(Json(StatsResponse {
        total_programmes: programmes.len(),
        total_projets: projets.len(),
        projets_actifs,
        total_budget: total_budget.to_string(),
        total_participation: total_participation.to_string(),
    }))
}
