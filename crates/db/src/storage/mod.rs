//! The persistence gateway contract.
//!
//! Handlers depend on [`Storage`] only; the two implementations
//! ([`MemStorage`] and [`PgStorage`]) are observably identical for every
//! contract method. The store is an injected object, never a module-level
//! singleton, so each test can own an isolated instance.

mod memory;
mod postgres;

use async_trait::async_trait;
use tanmia_core::types::DbId;

pub use memory::MemStorage;
pub use postgres::PgStorage;

use crate::models::programme::{CreateProgramme, Programme, UpdateProgramme};
use crate::models::projet::{CreateProjet, Projet, UpdateProjet};
use crate::models::user::{CreateUser, User};

/// Errors surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A uniqueness violation (e.g. duplicate username).
    #[error("{0}")]
    Conflict(String),
}

/// Uniform persistence contract for programmes, projets, and users.
///
/// `get_*` methods return absence, not an error, when the row is missing.
/// `update_*` methods merge only the supplied fields, bump `updated_at`,
/// and return `None` when the target does not exist. `delete_*` methods
/// report whether a row was actually removed.
#[async_trait]
pub trait Storage: Send + Sync {
    // --- Programmes ---
    async fn list_programmes(&self) -> Result<Vec<Programme>, StorageError>;
    async fn get_programme(&self, id: DbId) -> Result<Option<Programme>, StorageError>;
    async fn create_programme(&self, input: &CreateProgramme) -> Result<Programme, StorageError>;
    async fn update_programme(
        &self,
        id: DbId,
        input: &UpdateProgramme,
    ) -> Result<Option<Programme>, StorageError>;
    /// Deletes the programme and, atomically, every projet referencing it.
    async fn delete_programme(&self, id: DbId) -> Result<bool, StorageError>;

    // --- Projets ---
    async fn list_projets(&self) -> Result<Vec<Projet>, StorageError>;
    async fn list_projets_by_programme(
        &self,
        programme_id: DbId,
    ) -> Result<Vec<Projet>, StorageError>;
    async fn get_projet(&self, id: DbId) -> Result<Option<Projet>, StorageError>;
    async fn create_projet(&self, input: &CreateProjet) -> Result<Projet, StorageError>;
    async fn update_projet(
        &self,
        id: DbId,
        input: &UpdateProjet,
    ) -> Result<Option<Projet>, StorageError>;
    async fn delete_projet(&self, id: DbId) -> Result<bool, StorageError>;

    // --- Users ---
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;
    async fn get_user(&self, id: DbId) -> Result<Option<User>, StorageError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
    async fn create_user(&self, input: &CreateUser) -> Result<User, StorageError>;
    async fn delete_user(&self, id: DbId) -> Result<bool, StorageError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;
}
