//! Repository for the `programmes` table.

use sqlx::PgPool;
use tanmia_core::types::DbId;

use crate::models::programme::{CreateProgramme, Programme, UpdateProgramme};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nom, secteur, objectif_global, partenaires, montant_global, \
                       participation_region, date_debut, duree, created_at, updated_at";

/// Provides CRUD operations for programmes.
pub struct ProgrammeRepo;

impl ProgrammeRepo {
    /// Insert a new programme, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProgramme) -> Result<Programme, sqlx::Error> {
        let query = format!(
            "INSERT INTO programmes (nom, secteur, objectif_global, partenaires,
                                     montant_global, participation_region, date_debut, duree)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Programme>(&query)
            .bind(&input.nom)
            .bind(&input.secteur)
            .bind(&input.objectif_global)
            .bind(&input.partenaires)
            .bind(&input.montant_global)
            .bind(&input.participation_region)
            .bind(input.date_debut)
            .bind(&input.duree)
            .fetch_one(pool)
            .await
    }

    /// Find a programme by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Programme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programmes WHERE id = $1");
        sqlx::query_as::<_, Programme>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all programmes, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Programme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programmes ORDER BY id");
        sqlx::query_as::<_, Programme>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Only non-`None` fields change; `updated_at`
    /// is always bumped (a no-field payload is a valid no-op update).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgramme,
    ) -> Result<Option<Programme>, sqlx::Error> {
        let query = format!(
            "UPDATE programmes SET
                nom = COALESCE($2, nom),
                secteur = COALESCE($3, secteur),
                objectif_global = COALESCE($4, objectif_global),
                partenaires = COALESCE($5, partenaires),
                montant_global = COALESCE($6, montant_global),
                participation_region = COALESCE($7, participation_region),
                date_debut = COALESCE($8, date_debut),
                duree = COALESCE($9, duree),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Programme>(&query)
            .bind(id)
            .bind(&input.nom)
            .bind(&input.secteur)
            .bind(&input.objectif_global)
            .bind(&input.partenaires)
            .bind(&input.montant_global)
            .bind(&input.participation_region)
            .bind(input.date_debut)
            .bind(&input.duree)
            .fetch_optional(pool)
            .await
    }

    /// Delete a programme and every projet that references it, atomically.
    ///
    /// Returns `true` if the programme row existed. A crash mid-delete can
    /// never leave orphaned projets: both statements run in one transaction.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM projets WHERE programme_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM programmes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
