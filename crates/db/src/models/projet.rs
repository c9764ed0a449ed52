//! Projet entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tanmia_core::dates::deserialize_opt_flexible;
use tanmia_core::montant::{check_ordering, parse_opt_montant};
use tanmia_core::referentiel::{is_etat_avancement, is_province, ETATS_AVANCEMENT};
use tanmia_core::types::{DbId, Timestamp};
use tanmia_core::validation::FieldErrors;

/// Full projet row from the `projets` table.
///
/// A projet always belongs to a programme; deleting the programme deletes
/// its projets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Projet {
    pub id: DbId,
    pub nom: String,
    pub programme_id: DbId,
    pub objectifs: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    pub maitre_ouvrage: Option<String>,
    pub provinces: Option<Vec<String>>,
    pub communes: Option<String>,
    pub indicateurs_qualitatifs: Option<String>,
    pub indicateurs_quantitatifs: Option<String>,
    pub etat_avancement: String,
    pub remarques: Option<String>,
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a projet. Unknown JSON fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjet {
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub programme_id: DbId,
    pub objectifs: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    pub maitre_ouvrage: Option<String>,
    pub provinces: Option<Vec<String>>,
    pub communes: Option<String>,
    pub indicateurs_qualitatifs: Option<String>,
    pub indicateurs_quantitatifs: Option<String>,
    #[serde(default)]
    pub etat_avancement: String,
    pub remarques: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
}

impl CreateProjet {
    /// Check every field and return all failures at once.
    ///
    /// Referential integrity on `programme_id` needs storage and is checked
    /// by the handler.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.nom.trim().is_empty() {
            errors.push("nom", "le nom est requis");
        }
        if self.programme_id <= 0 {
            errors.push("programmeId", "l'identifiant du programme est requis");
        }
        if !is_etat_avancement(&self.etat_avancement) {
            errors.push(
                "etatAvancement",
                format!(
                    "état invalide, attendu l'un de: {}",
                    ETATS_AVANCEMENT.join(", ")
                ),
            );
        }
        validate_provinces(self.provinces.as_deref(), &mut errors);
        if let Err(msg) = parse_opt_montant(self.montant_global.as_deref()) {
            errors.push("montantGlobal", msg);
        }
        if let Err(msg) = parse_opt_montant(self.participation_region.as_deref()) {
            errors.push("participationRegion", msg);
        }
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

/// DTO for a partial projet update. `None` means "not being changed".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjet {
    pub nom: Option<String>,
    pub programme_id: Option<DbId>,
    pub objectifs: Option<String>,
    pub partenaires: Option<String>,
    pub montant_global: Option<String>,
    pub participation_region: Option<String>,
    pub maitre_ouvrage: Option<String>,
    pub provinces: Option<Vec<String>>,
    pub communes: Option<String>,
    pub indicateurs_qualitatifs: Option<String>,
    pub indicateurs_quantitatifs: Option<String>,
    pub etat_avancement: Option<String>,
    pub remarques: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub date_debut: Option<Timestamp>,
    pub duree: Option<String>,
}

impl UpdateProjet {
    /// Syntactic checks on supplied fields only.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(nom) = &self.nom {
            if nom.trim().is_empty() {
                errors.push("nom", "le nom ne peut pas être vide");
            }
        }
        if let Some(id) = self.programme_id {
            if id <= 0 {
                errors.push("programmeId", "identifiant de programme invalide");
            }
        }
        if let Some(etat) = &self.etat_avancement {
            if !is_etat_avancement(etat) {
                errors.push(
                    "etatAvancement",
                    format!(
                        "état invalide, attendu l'un de: {}",
                        ETATS_AVANCEMENT.join(", ")
                    ),
                );
            }
        }
        validate_provinces(self.provinces.as_deref(), &mut errors);
        if let Err(msg) = parse_opt_montant(self.montant_global.as_deref()) {
            errors.push("montantGlobal", msg);
        }
        if let Err(msg) = parse_opt_montant(self.participation_region.as_deref()) {
            errors.push("participationRegion", msg);
        }

        errors.into_result()
    }

    /// Ordering invariant against the merge with the existing row.
    pub fn check_ordering_against(&self, existing: &Projet) -> Result<(), FieldErrors> {
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

/// Every listed province must belong to the fixed enumeration.
fn validate_provinces(provinces: Option<&[String]>, errors: &mut FieldErrors) {
    let Some(provinces) = provinces else { return };
    for p in provinces {
        if !is_province(p) {
            errors.push("provinces", format!("province inconnue: '{p}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProjet {
        CreateProjet {
            nom: "Extension du périmètre irrigué".to_string(),
            programme_id: 1,
            etat_avancement: "En cours".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_all_reported() {
        let err = CreateProjet::default().validate().unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"nom"));
        assert!(fields.contains(&"programmeId"));
        assert!(fields.contains(&"etatAvancement"));
    }

    #[test]
    fn unknown_province_rejected() {
        let mut input = valid_create();
        input.provinces = Some(vec![
            "Province de Tiznit".to_string(),
            "Province de Casablanca".to_string(),
        ]);
        let err = input.validate().unwrap_err();
        assert_eq!(err.errors()[0].field, "provinces");
        assert!(err.errors()[0].message.contains("Casablanca"));
    }

    #[test]
    fn known_provinces_accepted() {
        let mut input = valid_create();
        input.provinces = Some(vec![
            "Province de Tata".to_string(),
            "Préfecture d'Agadir Ida-Outanane".to_string(),
        ]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_etat_must_be_known() {
        let update = UpdateProjet {
            etat_avancement: Some("Fini".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn create_ordering_invariant_applies() {
        let mut input = valid_create();
        input.montant_global = Some("100".to_string());
        input.participation_region = Some("150".to_string());
        assert!(input.validate().is_err());
    }
}
