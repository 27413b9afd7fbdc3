use std::borrow::Borrow;

use derive_more::{AsRef, Display};

use crate::{
    AccountID, Category, Classifications, CreateError, DeleteError, Field, MuscleGroup, Name,
    ReadError, Receipt, UpsertError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercise(&self, key: &str) -> Result<Exercise, ReadError>;
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn upsert_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, UpsertError>;
    async fn add_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, CreateError>;
    async fn delete_exercise(&self, caller: AccountID, key: &str) -> Result<Receipt, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercise(&self, key: &str) -> Result<Exercise, ReadError>;
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn upsert_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, UpsertError>;
    async fn create_exercise(
        &self,
        caller: AccountID,
        request: ExerciseRequest,
    ) -> Result<Receipt, CreateError>;
    async fn delete_exercise(&self, caller: AccountID, key: &str) -> Result<Receipt, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub key: ExerciseKey,
    pub name: Name,
    pub description: String,
    pub category: Category,
    pub muscle_group: MuscleGroup,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseKey(String);

impl ExerciseKey {
    pub fn new(key: &str) -> Result<Self, KeyError> {
        if key.trim().is_empty() {
            return Err(KeyError::Empty);
        }

        Ok(ExerciseKey(key.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ExerciseKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum KeyError {
    #[error("Key must not be empty")]
    Empty,
}

impl From<KeyError> for ValidationError {
    fn from(value: KeyError) -> Self {
        match value {
            KeyError::Empty => ValidationError::Empty(Field::Key),
        }
    }
}

/// Unvalidated arguments of a write call, as they arrive from a caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseRequest {
    pub key: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_group: String,
}

impl ExerciseRequest {
    /// Builds a request for the legacy call form, which identifies exercises by name.
    #[must_use]
    pub fn keyed_by_name(
        name: &str,
        description: &str,
        category: &str,
        muscle_group: &str,
    ) -> Self {
        Self {
            key: name.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            muscle_group: muscle_group.to_string(),
        }
    }

    pub fn validate(&self, classifications: &Classifications) -> Result<Exercise, ValidationError> {
        Ok(Exercise {
            key: ExerciseKey::new(&self.key)?,
            name: Name::new(&self.name)?,
            description: self.description.clone(),
            category: classifications.validate_category(&self.category)?,
            muscle_group: classifications.validate_muscle_group(&self.muscle_group)?,
        })
    }
}

impl From<Exercise> for ExerciseRequest {
    fn from(value: Exercise) -> Self {
        Self {
            key: value.key.to_string(),
            name: value.name.to_string(),
            description: value.description,
            category: value.category.to_string(),
            muscle_group: value.muscle_group.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn request(
        key: &str,
        name: &str,
        category: &str,
        muscle_group: &str,
    ) -> ExerciseRequest {
        ExerciseRequest {
            key: key.to_string(),
            name: name.to_string(),
            description: "Barbell squat".to_string(),
            category: category.to_string(),
            muscle_group: muscle_group.to_string(),
        }
    }

    #[rstest]
    #[case("squat-barbell", Ok(ExerciseKey("squat-barbell".to_string())))]
    #[case("", Err(KeyError::Empty))]
    #[case("\t", Err(KeyError::Empty))]
    fn test_exercise_key_new(#[case] key: &str, #[case] expected: Result<ExerciseKey, KeyError>) {
        assert_eq!(ExerciseKey::new(key), expected);
    }

    #[test]
    fn test_exercise_request_validate() {
        assert_eq!(
            request("squat-barbell", "Squat", "BARBELL", "BACK")
                .validate(&Classifications::default()),
            Ok(Exercise {
                key: ExerciseKey::new("squat-barbell").unwrap(),
                name: Name::new("Squat").unwrap(),
                description: "Barbell squat".to_string(),
                category: Category::Barbell,
                muscle_group: MuscleGroup::Back,
            })
        );
    }

    #[rstest]
    #[case(request("", "Squat", "BARBELL", "BACK"), ValidationError::Empty(Field::Key))]
    #[case(request("squat", "", "BARBELL", "BACK"), ValidationError::Empty(Field::Name))]
    #[case(request("squat", "Squat", "", "BACK"), ValidationError::Empty(Field::Category))]
    #[case(
        request("squat", "Squat", "BARBELL", ""),
        ValidationError::Empty(Field::MuscleGroup)
    )]
    #[case(
        request("squat", "Squat", "fake", "BACK"),
        ValidationError::UnknownCategory("fake".to_string())
    )]
    #[case(
        request("squat", "Squat", "BARBELL", "fake"),
        ValidationError::UnknownMuscleGroup("fake".to_string())
    )]
    fn test_exercise_request_validate_invalid(
        #[case] request: ExerciseRequest,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(request.validate(&Classifications::default()), Err(expected));
    }

    #[test]
    fn test_exercise_request_keyed_by_name() {
        assert_eq!(
            ExerciseRequest::keyed_by_name("Biscep curl", "Arm exercise", "DUMBBELL", "ARMS"),
            ExerciseRequest {
                key: "Biscep curl".to_string(),
                name: "Biscep curl".to_string(),
                description: "Arm exercise".to_string(),
                category: "DUMBBELL".to_string(),
                muscle_group: "ARMS".to_string(),
            }
        );
    }

    #[test]
    fn test_exercise_request_from_exercise() {
        let request = request("squat-barbell", "Squat", "BARBELL", "BACK");
        let exercise = request.validate(&Classifications::default()).unwrap();

        assert_eq!(ExerciseRequest::from(exercise), request);
    }
}
