//! Repository for the `projets` table.

use sqlx::PgPool;
use tanmia_core::types::DbId;

use crate::models::projet::{CreateProjet, Projet, UpdateProjet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nom, programme_id, objectifs, partenaires, montant_global, \
                       participation_region, maitre_ouvrage, provinces, communes, \
                       indicateurs_qualitatifs, indicateurs_quantitatifs, etat_avancement, \
                       remarques, date_debut, duree, created_at, updated_at";

/// Provides CRUD operations for projets.
pub struct ProjetRepo;

impl ProjetRepo {
    /// Insert a new projet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProjet) -> Result<Projet, sqlx::Error> {
        let query = format!(
            "INSERT INTO projets (nom, programme_id, objectifs, partenaires, montant_global,
                                  participation_region, maitre_ouvrage, provinces, communes,
                                  indicateurs_qualitatifs, indicateurs_quantitatifs,
                                  etat_avancement, remarques, date_debut, duree)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Projet>(&query)
            .bind(&input.nom)
            .bind(input.programme_id)
            .bind(&input.objectifs)
            .bind(&input.partenaires)
            .bind(&input.montant_global)
            .bind(&input.participation_region)
            .bind(&input.maitre_ouvrage)
            .bind(&input.provinces)
            .bind(&input.communes)
            .bind(&input.indicateurs_qualitatifs)
            .bind(&input.indicateurs_quantitatifs)
            .bind(&input.etat_avancement)
            .bind(&input.remarques)
            .bind(input.date_debut)
            .bind(&input.duree)
            .fetch_one(pool)
            .await
    }

    /// Find a projet by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Projet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projets WHERE id = $1");
        sqlx::query_as::<_, Projet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projets, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Projet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projets ORDER BY id");
        sqlx::query_as::<_, Projet>(&query).fetch_all(pool).await
    }

    /// List the projets belonging to one programme.
    pub async fn list_by_programme(
        pool: &PgPool,
        programme_id: DbId,
    ) -> Result<Vec<Projet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projets WHERE programme_id = $1 ORDER BY id");
        sqlx::query_as::<_, Projet>(&query)
            .bind(programme_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields change; `updated_at`
    /// is always bumped.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjet,
    ) -> Result<Option<Projet>, sqlx::Error> {
        let query = format!(
            "UPDATE projets SET
                nom = COALESCE($2, nom),
                programme_id = COALESCE($3, programme_id),
                objectifs = COALESCE($4, objectifs),
                partenaires = COALESCE($5, partenaires),
                montant_global = COALESCE($6, montant_global),
                participation_region = COALESCE($7, participation_region),
                maitre_ouvrage = COALESCE($8, maitre_ouvrage),
                provinces = COALESCE($9, provinces),
                communes = COALESCE($10, communes),
                indicateurs_qualitatifs = COALESCE($11, indicateurs_qualitatifs),
                indicateurs_quantitatifs = COALESCE($12, indicateurs_quantitatifs),
                etat_avancement = COALESCE($13, etat_avancement),
                remarques = COALESCE($14, remarques),
                date_debut = COALESCE($15, date_debut),
                duree = COALESCE($16, duree),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Projet>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(input.programme_id)
            .bind(&input.objectifs)
            .bind(&input.partenaires)
            .bind(&input.montant_global)
            .bind(&input.participation_region)
            .bind(&input.maitre_ouvrage)
            .bind(&input.provinces)
            .bind(&input.communes)
            .bind(&input.indicateurs_qualitatifs)
            .bind(&input.indicateurs_quantitatifs)
            .bind(&input.etat_avancement)
            .bind(&input.remarques)
            .bind(input.date_debut)
            .bind(&input.duree)
            .fetch_optional(pool)
            .await
    }

    /// Delete a projet. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
