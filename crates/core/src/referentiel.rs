//! Fixed reference enumerations for programmes and projets.
//!
//! These are the exact labels stored in the database and shown in the UI;
//! membership is checked with string equality, accents included.

/// Economic sectors a programme may belong to.
pub const SECTEURS: [&str; 7] = [
    "Agriculture",
    "Industrie",
    "Tourisme",
    "Artisanat",
    "Services",
    "Infrastructure",
    "Formation",
];

/// Progress states a projet may be in.
pub const ETATS_AVANCEMENT: [&str; 4] = ["Planifié", "En cours", "Terminé", "Suspendu"];

/// The progress state counted as "active" by the stats aggregation.
pub const ETAT_EN_COURS: &str = "En cours";

/// Provinces and prefectures of the Souss-Massa region.
pub const PROVINCES: [&str; 6] = [
    "Préfecture d'Agadir Ida-Outanane",
    "Préfecture d'Inezgane-Aït Melloul",
    "Province de Chtouka-Aït Baha",
    "Province de Taroudannt",
    "Province de Tiznit",
    "Province de Tata",
];

/// Whether `secteur` is one of [`SECTEURS`].
pub fn is_secteur(secteur: &str) -> bool {
    SECTEURS.contains(&secteur)
}

/// Whether `etat` is one of [`ETATS_AVANCEMENT`].
pub fn is_etat_avancement(etat: &str) -> bool {
    ETATS_AVANCEMENT.contains(&etat)
}

/// Whether `province` is one of [`PROVINCES`].
pub fn is_province(province: &str) -> bool {
    PROVINCES.contains(&province)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secteur_membership() {
        assert!(is_secteur("Agriculture"));
        assert!(is_secteur("Formation"));
        assert!(!is_secteur("Pêche"));
        assert!(!is_secteur("agriculture"));
    }

    #[test]
    fn etat_membership() {
        assert!(is_etat_avancement("En cours"));
        assert!(is_etat_avancement("Planifié"));
        assert!(!is_etat_avancement("En Cours"));
        assert!(!is_etat_avancement(""));
    }

    #[test]
    fn province_membership() {
        assert!(is_province("Province de Tiznit"));
        assert!(!is_province("Province de Casablanca"));
    }
}
