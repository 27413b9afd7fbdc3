//! In-memory registry
//!
//! Keeps the registry state in process memory only. Clones share the same state.

use std::sync::{Arc, Mutex, MutexGuard};

use swoleth_domain as domain;

#[derive(Clone)]
pub struct InMemory {
    registry: Arc<Mutex<domain::Registry>>,
}

impl InMemory {
    #[must_use]
    pub fn deploy(owner: domain::AccountID, classifications: domain::Classifications) -> Self {
        Self::from(domain::Registry::new(owner, classifications))
    }

    fn lock(&self) -> Result<MutexGuard<'_, domain::Registry>, domain::StorageError> {
        self.registry
            .lock()
            .map_err(|_| domain::StorageError::Poisoned)
    }
}

impl From<domain::Registry> for InMemory {
    fn from(value: domain::Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(value)),
        }
    }
}

impl domain::RegistryRepository for InMemory {
    async fn read_owner(&self) -> Result<domain::AccountID, domain::ReadError> {
        Ok(self.lock()?.owner())
    }

    async fn read_category(&self, token: &str) -> Result<domain::Category, domain::ReadError> {
        self.lock()?.category(token)
    }

    async fn read_muscle_group(
        &self,
        token: &str,
    ) -> Result<domain::MuscleGroup, domain::ReadError> {
        self.lock()?.muscle_group(token)
    }
}

impl domain::ExerciseRepository for InMemory {
    async fn read_exercise(&self, key: &str) -> Result<domain::Exercise, domain::ReadError> {
        self.lock()?.exercise(key).cloned()
    }

    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.lock()?.exercises().cloned().collect())
    }

    async fn upsert_exercise(
        &self,
        caller: domain::AccountID,
        request: domain::ExerciseRequest,
    ) -> Result<domain::Receipt, domain::UpsertError> {
        self.lock()?.upsert_exercise(caller, &request)
    }

    async fn create_exercise(
        &self,
        caller: domain::AccountID,
        request: domain::ExerciseRequest,
    ) -> Result<domain::Receipt, domain::CreateError> {
        self.lock()?.add_exercise(caller, &request)
    }

    async fn delete_exercise(
        &self,
        caller: domain::AccountID,
        key: &str,
    ) -> Result<domain::Receipt, domain::DeleteError> {
        self.lock()?.delete_exercise(caller, key)
    }
}
