//! Programme entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tanmia_core::dates::deserialize_opt_flexible;
use tanmia_core::montant::{check_ordering, parse_opt_montant};
use tanmia_core::referentiel::{is_secteur, SECTEURS};
use tanmia_core::types::{DbId, Timestamp};
use tanmia_core::validation::FieldErrors;

/// Full programme row from the `programmes` table.
///
/// Amount fields are decimal strings; see `tanmia_core::montant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    pub id: DbId,
    pub nom: String,
    pub secteur: String,
    pub objectif_global: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a programme. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramme {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub secteur: String,
    pub objectif_global: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
}

impl CreateProgramme {
    /// Check every field and return all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.nom.trim().is_empty() {
            errors.push("nom", "le nom est requis");
        }
        if !is_secteur(&self.secteur) {
            errors.push(
                "secteur",
                format!("secteur invalide, attendu l'un de: {}", SECTEURS.join(", ")),
            );
        }
        if let Err(msg) = parse_opt_montant(self.montant_global.as_deref()) {
            errors.push("montantGlobal", msg);
        }
        if let Err(msg) = parse_opt_montant(self.participation_region.as_deref()) {
            errors.push("participationRegion", msg);
        }
        // Ordering invariant only when both sides parsed individually.
        if errors.is_empty() {
            if let Err(msg) = check_ordering(
                self.montant_global.as_deref(),
                self.participation_region.as_deref(),
            ) {
                errors.push("participationRegion", msg);
            }
        }

        errors.into_result()
    }
}

/// DTO for a partial programme update. `None` means "not being changed".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramme {
    pub nom: Option<String>,
    pub secteur: Option<String>,
    pub objectif_global: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
}

impl UpdateProgramme {
    /// Syntactic checks on supplied fields only. The amount-ordering
    /// invariant needs the existing row and is checked by the handler via
    /// [`UpdateProgramme::check_ordering_against`].
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(nom) = &self.nom {
            if nom.trim().is_empty() {
                errors.push("nom", "le nom ne peut pas être vide");
            }
        }
        if let Some(secteur) = &self.secteur {
            if !is_secteur(secteur) {
                errors.push(
                    "secteur",
                    format!("secteur invalide, attendu l'un de: {}", SECTEURS.join(", ")),
                );
            }
        }
        if let Err(msg) = parse_opt_montant(self.montant_global.as_deref()) {
            errors.push("montantGlobal", msg);
        }
        if let Err(msg) = parse_opt_montant(self.participation_region.as_deref()) {
            errors.push("participationRegion", msg);
        }

        errors.into_result()
    }

    /// Re-check the ordering invariant against the merge of this payload
    /// with the existing row (omitted fields keep their current value).
    pub fn check_ordering_against(&self, existing: &Programme) -> Result<(), FieldErrors> {
        let montant = self
            .montant_global
            .as_deref()
            .or(existing.montant_global.as_deref());
        let participation = self
            .participation_region
            .as_deref()
            .or(existing.participation_region.as_deref());

        let mut errors = FieldErrors::new();
        if let Err(msg) = check_ordering(montant, participation) {
            errors.push("participationRegion", msg);
        }
        errors.into_result()
    }
}
