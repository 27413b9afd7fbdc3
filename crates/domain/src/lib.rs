#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod account;
mod classification;
mod error;
mod exercise;
mod name;
mod registry;
mod service;

pub use account::AccountID;
pub use classification::{Category, Classifications, MuscleGroup};
pub use error::{
    CreateError, DeleteError, Field, ReadError, StorageError, UpsertError, ValidationError,
};
pub use exercise::{
    Exercise, ExerciseKey, ExerciseRepository, ExerciseRequest, ExerciseService, KeyError,
};
pub use name::{Name, NameError};
pub use registry::{
    Event, Receipt, Registry, RegistryRepository, RegistryService, TransactionID,
};
pub use service::Service;
