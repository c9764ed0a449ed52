//! In-memory storage backend.
//!
//! Process-lifetime only; used for tests and for bootstrapping without a
//! database. Mirrors the PostgreSQL backend's observable behavior: id
//! assignment from 1, timestamp handling, COALESCE-style partial merges,
//! and the atomic programme-delete cascade (both removals happen under one
//! lock acquisition).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tanmia_core::types::DbId;

use crate::models::programme::{CreateProgramme, Programme, UpdateProgramme};
use crate::models::projet::{CreateProjet, Projet, UpdateProjet};
use crate::models::user::{CreateUser, User};

use super::{Storage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    programmes: BTreeMap<DbId, Programme>,
    projets: BTreeMap<DbId, Projet>,
    users: BTreeMap<DbId, User>,
    next_programme_id: DbId,
    next_projet_id: DbId,
    next_user_id: DbId,
}

/// Map-backed [`Storage`] implementation.
#[derive(Debug)]
pub struct MemStorage {
    inner: Mutex<Inner>,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            inner: Mutex::new(Inner {
                next_programme_id: 1,
                next_projet_id: 1,
                next_user_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation; propagating the
        // panic is the only sound option for an in-memory test store.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn list_programmes(&self) -> Result<Vec<Programme>, StorageError> {
        Ok(self.lock().programmes.values().cloned().collect())
    }

    async fn get_programme(&self, id: DbId) -> Result<Option<Programme>, StorageError> {
        Ok(self.lock().programmes.get(&id).cloned())
    }

    async fn create_programme(&self, input: &CreateProgramme) -> Result<Programme, StorageError> {
        let mut inner = self.lock();
        let id = inner.next_programme_id;
        inner.next_programme_id += 1;
        let now = Utc::now();
        let programme = Programme {
            id,
            nom: input.nom.clone(),
            secteur: input.secteur.clone(),
            objectif_global: input.objectif_global.clone(),
            partenaires: input.partenaires.clone(),
            montant_global: input.montant_global.clone(),
            participation_region: input.participation_region.clone(),
            date_debut: input.date_debut,
            duree: input.duree.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.programmes.insert(id, programme.clone());
        Ok(programme)
    }

    async fn update_programme(
        &self,
        id: DbId,
        input: &UpdateProgramme,
    ) -> Result<Option<Programme>, StorageError> {
        let mut inner = self.lock();
        let Some(programme) = inner.programmes.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nom) = &input.nom {
            programme.nom = nom.clone();
        }
        if let Some(secteur) = &input.secteur {
            programme.secteur = secteur.clone();
        }
        if input.objectif_global.is_some() {
            programme.objectif_global = input.objectif_global.clone();
        }
        if input.partenaires.is_some() {
            programme.partenaires = input.partenaires.clone();
        }
        if input.montant_global.is_some() {
            programme.montant_global = input.montant_global.clone();
        }
        if input.participation_region.is_some() {
            programme.participation_region = input.participation_region.clone();
        }
        if input.date_debut.is_some() {
            programme.date_debut = input.date_debut;
        }
        if input.duree.is_some() {
            programme.duree = input.duree.clone();
        }
        programme.updated_at = Utc::now();
        Ok(Some(programme.clone()))
    }

    async fn delete_programme(&self, id: DbId) -> Result<bool, StorageError> {
        let mut inner = self.lock();
        // Cascade first, then the programme row, under the same lock.
        inner.projets.retain(|_, p| p.programme_id != id);
        Ok(inner.programmes.remove(&id).is_some())
    }

    async fn list_projets(&self) -> Result<Vec<Projet>, StorageError> {
        Ok(self.lock().projets.values().cloned().collect())
    }

    async fn list_projets_by_programme(
        &self,
        programme_id: DbId,
    ) -> Result<Vec<Projet>, StorageError> {
        Ok(self
            .lock()
            .projets
            .values()
            .filter(|p| p.programme_id == programme_id)
            .cloned()
            .collect())
    }

    async fn get_projet(&self, id: DbId) -> Result<Option<Projet>, StorageError> {
        Ok(self.lock().projets.get(&id).cloned())
    }

    async fn create_projet(&self, input: &CreateProjet) -> Result<Projet, StorageError> {
        let mut inner = self.lock();
        let id = inner.next_projet_id;
        inner.next_projet_id += 1;
        let now = Utc::now();
        let projet = Projet {
            id,
            nom: input.nom.clone(),
            programme_id: input.programme_id,
            objectifs: input.objectifs.clone(),
            partenaires: input.partenaires.clone(),
            montant_global: input.montant_global.clone(),
            participation_region: input.participation_region.clone(),
            maitre_ouvrage: input.maitre_ouvrage.clone(),
            provinces: input.provinces.clone(),
            communes: input.communes.clone(),
            indicateurs_qualitatifs: input.indicateurs_qualitatifs.clone(),
            indicateurs_quantitatifs: input.indicateurs_quantitatifs.clone(),
            etat_avancement: input.etat_avancement.clone(),
            remarques: input.remarques.clone(),
            date_debut: input.date_debut,
            duree: input.duree.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.projets.insert(id, projet.clone());
        Ok(projet)
    }

    async fn update_projet(
        &self,
        id: DbId,
        input: &UpdateProjet,
    ) -> Result<Option<Projet>, StorageError> {
        let mut inner = self.lock();
        let Some(projet) = inner.projets.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nom) = &input.nom {
            projet.nom = nom.clone();
        }
        if let Some(programme_id) = input.programme_id {
            projet.programme_id = programme_id;
        }
        if input.objectifs.is_some() {
            projet.objectifs = input.objectifs.clone();
        }
        if input.partenaires.is_some() {
            projet.partenaires = input.partenaires.clone();
        }
        if input.montant_global.is_some() {
            projet.montant_global = input.montant_global.clone();
        }
        if input.participation_region.is_some() {
            projet.participation_region = input.participation_region.clone();
        }
        if input.maitre_ouvrage.is_some() {
            projet.maitre_ouvrage = input.maitre_ouvrage.clone();
        }
        if input.provinces.is_some() {
            projet.provinces = input.provinces.clone();
        }
        if input.communes.is_some() {
            projet.communes = input.communes.clone();
        }
        if input.indicateurs_qualitatifs.is_some() {
            projet.indicateurs_qualitatifs = input.indicateurs_qualitatifs.clone();
        }
        if input.indicateurs_quantitatifs.is_some() {
            projet.indicateurs_quantitatifs = input.indicateurs_quantitatifs.clone();
        }
        if let Some(etat) = &input.etat_avancement {
            projet.etat_avancement = etat.clone();
        }
        if input.remarques.is_some() {
            projet.remarques = input.remarques.clone();
        }
        if input.date_debut.is_some() {
            projet.date_debut = input.date_debut;
        }
        if input.duree.is_some() {
            projet.duree = input.duree.clone();
        }
        projet.updated_at = Utc::now();
        Ok(Some(projet.clone()))
    }

    async fn delete_projet(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(self.lock().projets.remove(&id).is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StorageError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StorageError> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == input.username) {
            return Err(StorageError::Conflict(format!(
                "username '{}' already exists",
                input.username
            )));
        }
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: Utc::now(),
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: DbId) -> Result<bool, StorageError> {
        Ok(self.lock().users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
