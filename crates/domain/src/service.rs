use log::{debug, error, warn};

use crate::{
    AccountID, Category, CreateError, DeleteError, Exercise, ExerciseRepository, ExerciseRequest,
    ExerciseService, MuscleGroup, ReadError, Receipt, RegistryRepository, RegistryService,
    UpsertError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {
                debug!("{} {}", $action, $entity);
            }
            Err(ref err) => match err {
                $error::Storage(_) => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    warn!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: RegistryRepository> RegistryService for Service<R> {
    async fn get_owner(&self) -> Result<AccountID, ReadError> {
        log_on_error!(self.repository.read_owner(), ReadError, "get", "owner")
    }

    async fn get_category(&self, token: &str) -> Result<Category, ReadError> {
        log_on_error!(
            self.repository.read_category(token),
            ReadError,
            "get",
            "category"
        )
    }

    async fn get_muscle_group(&self, token: &str) -> Result<MuscleGroup, ReadError> {
        log_on_error!(
            self.repository.read_muscle_group(token),
            ReadError,
            "get",
            "muscle group"
        )
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercise(&self, key: &str) -> Result<Exercise, ReadError> {
        log_on_error!(
            self.repository.read_exercise(key),
            ReadError,
            "get",
            "exercise"
        )
    }

    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn upsert_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, UpsertError> {
        log_on_error!(
            self.repository.upsert_exercise(caller, request),
            UpsertError,
            "upsert",
            "exercise"
        )
    }

    async fn add_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, CreateError> {
        log_on_error!(
            self.repository.create_exercise(caller, request),
            CreateError,
            "add",
            "exercise"
        )
    }

    async fn delete_exercise(&self, caller: AccountID, key: &str) -> Result<Receipt, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(caller, key),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}
