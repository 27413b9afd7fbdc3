//! JSON State File
//!
//! The registry state is kept in memory and mirrored into a single JSON document. A write is
//! applied to a copy of the state, which replaces the in-memory state only after it has been
//! persisted. The document is replaced atomically by writing a temporary file next to it and
//! renaming it.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use log::debug;
use uuid::Uuid;

use swoleth_domain as domain;

macro_rules! transact {
    ($self: ident, $method: ident, $($arg:expr),*) => {{
        let mut registry = $self.lock()?;
        let mut next = registry.clone();
        let receipt = next.$method($($arg),*)?;
        write(&$self.path, &next).map_err(domain::StorageError::from)?;
        *registry = next;
        Ok(receipt)
    }};
}

pub struct JsonFile {
    path: PathBuf,
    registry: Mutex<domain::Registry>,
}

impl JsonFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonFileError> {
        let path = path.into();
        let registry = Self::read(&path)?;
        debug!(
            "opened registry at {} with {} exercises",
            path.display(),
            registry.exercises().count()
        );
        Ok(Self {
            path,
            registry: Mutex::new(registry),
        })
    }

    /// Reads the registry state stored at `path`.
    pub fn read(path: &Path) -> Result<domain::Registry, JsonFileError> {
        let content = fs::read(path).map_err(|source| JsonFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state: State = serde_json::from_slice(&content)?;
        domain::Registry::try_from(state)
    }

    /// Creates a new, empty registry file.
    pub fn deploy(
        path: impl Into<PathBuf>,
        owner: domain::AccountID,
        classifications: domain::Classifications,
    ) -> Result<Self, JsonFileError> {
        let path = path.into();
        if path.exists() {
            return Err(JsonFileError::AlreadyExists(path));
        }
        let registry = domain::Registry::new(owner, classifications);
        write(&path, &registry)?;
        debug!("deployed registry at {} owned by {owner}", path.display());
        Ok(Self {
            path,
            registry: Mutex::new(registry),
        })
    }

    pub fn open_or_deploy(
        path: impl Into<PathBuf>,
        owner: domain::AccountID,
        classifications: domain::Classifications,
    ) -> Result<Self, JsonFileError> {
        let path = path.into();
        if path.exists() {
            Self::open(path)
        } else {
            Self::deploy(path, owner, classifications)
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> Result<domain::Registry, domain::StorageError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, domain::Registry>, domain::StorageError> {
        self.registry
            .lock()
            .map_err(|_| domain::StorageError::Poisoned)
    }
}

fn write(path: &Path, registry: &domain::Registry) -> Result<(), JsonFileError> {
    let content = serde_json::to_vec_pretty(&State::from(registry))?;
    let temporary = path.with_extension("json.tmp");
    fs::write(&temporary, content).map_err(|source| JsonFileError::Io {
        path: temporary.clone(),
        source,
    })?;
    fs::rename(&temporary, path).map_err(|source| {
        let _ = fs::remove_file(&temporary);
        JsonFileError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

impl domain::RegistryRepository for JsonFile {
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

impl domain::ExerciseRepository for JsonFile {
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
        transact!(self, upsert_exercise, caller, &request)
    }

    async fn create_exercise(
        &self,
        caller: domain::AccountID,
        request: domain::ExerciseRequest,
    ) -> Result<domain::Receipt, domain::CreateError> {
        transact!(self, add_exercise, caller, &request)
    }

    async fn delete_exercise(
        &self,
        caller: domain::AccountID,
        key: &str,
    ) -> Result<domain::Receipt, domain::DeleteError> {
        transact!(self, delete_exercise, caller, key)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum JsonFileError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("registry already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("invalid registry state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<domain::ValidationError> for JsonFileError {
    fn from(value: domain::ValidationError) -> Self {
        JsonFileError::InvalidState(value.to_string())
    }
}

impl From<JsonFileError> for domain::StorageError {
    fn from(value: JsonFileError) -> Self {
        domain::StorageError::Other(Box::new(value))
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct State {
    owner: Uuid,
    categories: Vec<String>,
    muscle_groups: Vec<String>,
    exercises: Vec<Exercise>,
}

impl From<&domain::Registry> for State {
    fn from(value: &domain::Registry) -> Self {
        Self {
            owner: *value.owner(),
            categories: value
                .classifications()
                .categories()
                .map(|c| c.to_string())
                .collect(),
            muscle_groups: value
                .classifications()
                .muscle_groups()
                .map(|m| m.to_string())
                .collect(),
            exercises: value.exercises().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<State> for domain::Registry {
    type Error = JsonFileError;

    fn try_from(value: State) -> Result<Self, Self::Error> {
        let categories = value
            .categories
            .iter()
            .map(|c| {
                c.parse::<domain::Category>()
                    .map_err(|_| JsonFileError::InvalidState(format!("unknown category \"{c}\"")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let muscle_groups = value
            .muscle_groups
            .iter()
            .map(|m| {
                m.parse::<domain::MuscleGroup>().map_err(|_| {
                    JsonFileError::InvalidState(format!("unknown muscle group \"{m}\""))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(domain::Registry::restore(
            value.owner.into(),
            domain::Classifications::new(categories, muscle_groups),
            value
                .exercises
                .into_iter()
                .map(domain::ExerciseRequest::from),
        )?)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct Exercise {
    key: String,
    name: String,
    description: String,
    category: String,
    muscle_group: String,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            key: value.key.to_string(),
            name: value.name.to_string(),
            description: value.description.clone(),
            category: value.category.to_string(),
            muscle_group: value.muscle_group.to_string(),
        }
    }
}

impl From<Exercise> for domain::ExerciseRequest {
    fn from(value: Exercise) -> Self {
        Self {
            key: value.key,
            name: value.name,
            description: value.description,
            category: value.category,
            muscle_group: value.muscle_group,
        }
    }
}
