//! PostgreSQL storage backend, delegating to the repository structs.

use async_trait::async_trait;
use tanmia_core::types::DbId;

use crate::models::programme::{CreateProgramme, Programme, UpdateProgramme};
use crate::models::projet::{CreateProjet, Projet, UpdateProjet};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ProgrammeRepo, ProjetRepo, UserRepo};
use crate::DbPool;

use super::{Storage, StorageError};

/// [`Storage`] implementation backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        PgStorage { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn list_programmes(&self) -> Result<Vec<Programme>, StorageError> {
        Ok(ProgrammeRepo::list(&self.pool).await?)
    }

    async fn get_programme(&self, id: DbId) -> Result<Option<Programme>, StorageError> {
        Ok(ProgrammeRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_programme(&self, input: &CreateProgramme) -> Result<Programme, StorageError> {
        Ok(ProgrammeRepo::create(&self.pool, input).await?)
    }

    async fn update_programme(
        &self,
        id: DbId,
        input: &UpdateProgramme,
    ) -> Result<Option<Programme>, StorageError> {
        Ok(ProgrammeRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_programme(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(ProgrammeRepo::delete_cascade(&self.pool, id).await?)
    }

    async fn list_projets(&self) -> Result<Vec<Projet>, StorageError> {
        Ok(ProjetRepo::list(&self.pool).await?)
    }

    async fn list_projets_by_programme(
        &self,
        programme_id: DbId,
    ) -> Result<Vec<Projet>, StorageError> {
        Ok(ProjetRepo::list_by_programme(&self.pool, programme_id).await?)
    }

    async fn get_projet(&self, id: DbId) -> Result<Option<Projet>, StorageError> {
        Ok(ProjetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_projet(&self, input: &CreateProjet) -> Result<Projet, StorageError> {
        Ok(ProjetRepo::create(&self.pool, input).await?)
    }

    async fn update_projet(
        &self,
        id: DbId,
        input: &UpdateProjet,
    ) -> Result<Option<Projet>, StorageError> {
        Ok(ProjetRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_projet(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(ProjetRepo::delete(&self.pool, id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StorageError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StorageError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
