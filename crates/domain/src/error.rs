/// Exercise field subject to validation.
#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    #[strum(to_string = "key")]
    Key,
    #[strum(to_string = "name")]
    Name,
    #[strum(to_string = "category")]
    Category,
    #[strum(to_string = "muscle group")]
    MuscleGroup,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(Field),
    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),
    #[error("unknown muscle group \"{0}\"")]
    UnknownMuscleGroup(String),
    #[error("duplicate key \"{0}\"")]
    DuplicateKey(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum UpsertError {
    #[error("caller is not the owner")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("caller is not the owner")]
    Unauthorized,
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<UpsertError> for CreateError {
    fn from(value: UpsertError) -> Self {
        match value {
            UpsertError::Unauthorized => CreateError::Unauthorized,
            UpsertError::Validation(validation) => CreateError::Validation(validation),
            UpsertError::Storage(storage) => CreateError::Storage(storage),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("caller is not the owner")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("registry state is poisoned")]
    Poisoned,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}
