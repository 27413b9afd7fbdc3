use std::collections::BTreeMap;

use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    AccountID, Category, Classifications, CreateError, DeleteError, Exercise, ExerciseKey,
    ExerciseRequest, MuscleGroup, ReadError, UpsertError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait RegistryService {
    async fn get_owner(&self) -> Result<AccountID, ReadError>;
    async fn get_category(&self, token: &str) -> Result<Category, ReadError>;
    async fn get_muscle_group(&self, token: &str) -> Result<MuscleGroup, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait RegistryRepository {
    async fn read_owner(&self) -> Result<AccountID, ReadError>;
    async fn read_category(&self, token: &str) -> Result<Category, ReadError>;
    async fn read_muscle_group(&self, token: &str) -> Result<MuscleGroup, ReadError>;
}

#[derive(Deref, Debug, Display, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransactionID(Uuid);

impl TransactionID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for TransactionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TransactionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Notification emitted by a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ExerciseUpserted(Exercise),
    ExerciseCreated(Exercise),
    ExerciseDeleted { key: ExerciseKey },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction: TransactionID,
    pub events: Vec<Event>,
}

impl Receipt {
    fn new(event: Event) -> Self {
        Self {
            transaction: TransactionID::generate(),
            events: vec![event],
        }
    }
}

/// Exercise registry.
///
/// Holds one exercise per key. Reads are open to everyone, writes are restricted to the owner
/// fixed at creation. A rejected write leaves the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    owner: AccountID,
    classifications: Classifications,
    exercises: BTreeMap<ExerciseKey, Exercise>,
}

impl Registry {
    #[must_use]
    pub fn new(owner: AccountID, classifications: Classifications) -> Self {
        Self {
            owner,
            classifications,
            exercises: BTreeMap::new(),
        }
    }

    /// Rebuilds a registry from previously stored exercises.
    ///
    /// Every exercise is validated against the given classifications. Keys must be unique.
    pub fn restore(
        owner: AccountID,
        classifications: Classifications,
        exercises: impl IntoIterator<Item = ExerciseRequest>,
    ) -> Result<Self, ValidationError> {
        let mut registry = Self::new(owner, classifications);
        for request in exercises {
            let exercise = request.validate(&registry.classifications)?;
            if let Some(previous) = registry.exercises.insert(exercise.key.clone(), exercise) {
                return Err(ValidationError::DuplicateKey(previous.key.to_string()));
            }
        }
        Ok(registry)
    }

    #[must_use]
    pub fn owner(&self) -> AccountID {
        self.owner
    }

    #[must_use]
    pub fn classifications(&self) -> &Classifications {
        &self.classifications
    }

    pub fn category(&self, token: &str) -> Result<Category, ReadError> {
        self.classifications
            .category(token)
            .ok_or(ReadError::NotFound)
    }

    pub fn muscle_group(&self, token: &str) -> Result<MuscleGroup, ReadError> {
        self.classifications
            .muscle_group(token)
            .ok_or(ReadError::NotFound)
    }

    pub fn exercise(&self, key: &str) -> Result<&Exercise, ReadError> {
        self.exercises.get(key).ok_or(ReadError::NotFound)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.values()
    }

    #[must_use]
    pub fn is_owner(&self, caller: AccountID) -> bool {
        caller == self.owner
    }

    pub fn upsert_exercise(
        &mut self,
        caller: AccountID,
        request: &ExerciseRequest,
    ) -> Result<Receipt, UpsertError> {
        if !self.is_owner(caller) {
            return Err(UpsertError::Unauthorized);
        }
        let exercise = request.validate(&self.classifications)?;
        self.exercises.insert(exercise.key.clone(), exercise.clone());
        Ok(Receipt::new(Event::ExerciseUpserted(exercise)))
    }

    /// Inserts an exercise without overwriting an existing one.
    pub fn add_exercise(
        &mut self,
        caller: AccountID,
        request: &ExerciseRequest,
    ) -> Result<Receipt, CreateError> {
        if !self.is_owner(caller) {
            return Err(CreateError::Unauthorized);
        }
        let exercise = request.validate(&self.classifications)?;
        if self.exercises.contains_key(&exercise.key) {
            return Err(CreateError::Conflict);
        }
        self.exercises.insert(exercise.key.clone(), exercise.clone());
        Ok(Receipt::new(Event::ExerciseCreated(exercise)))
    }

    pub fn delete_exercise(
        &mut self,
        caller: AccountID,
        key: &str,
    ) -> Result<Receipt, DeleteError> {
        if !self.is_owner(caller) {
            return Err(DeleteError::Unauthorized);
        }
        match self.exercises.remove(key) {
            Some(exercise) => Ok(Receipt::new(Event::ExerciseDeleted { key: exercise.key })),
            None => Err(DeleteError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use crate::{Field, Name};

    use super::*;

    const ALICE: u128 = 1;
    const BOB: u128 = 2;

    #[fixture]
    fn registry() -> Registry {
        Registry::new(ALICE.into(), Classifications::default())
    }

    fn squat() -> ExerciseRequest {
        ExerciseRequest {
            key: "squat-barbell".to_string(),
            name: "Squat".to_string(),
            description: "Barbell squat".to_string(),
            category: "BARBELL".to_string(),
            muscle_group: "BACK".to_string(),
        }
    }

    fn biscep_curl() -> ExerciseRequest {
        ExerciseRequest::keyed_by_name("Biscep curl", "Arm exercise", "DUMBBELL", "ARMS")
    }

    #[rstest]
    fn test_fresh_registry(registry: Registry) {
        assert_eq!(registry.owner(), AccountID::from(ALICE));
        assert_eq!(registry.category("MACHINE").unwrap(), Category::Machine);
        assert_eq!(registry.muscle_group("CHEST").unwrap(), MuscleGroup::Chest);
        assert!(matches!(registry.category("fake"), Err(ReadError::NotFound)));
        assert!(matches!(registry.muscle_group("fake"), Err(ReadError::NotFound)));
        assert_eq!(registry.exercises().count(), 0);
    }

    #[rstest]
    fn test_upsert_delete_scenario(mut registry: Registry) {
        let receipt = registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        let expected = Exercise {
            key: ExerciseKey::new("squat-barbell").unwrap(),
            name: Name::new("Squat").unwrap(),
            description: "Barbell squat".to_string(),
            category: Category::Barbell,
            muscle_group: MuscleGroup::Back,
        };
        assert_eq!(
            receipt.events,
            vec![Event::ExerciseUpserted(expected.clone())]
        );
        assert_eq!(registry.exercise("squat-barbell").unwrap(), &expected);

        let receipt = registry
            .delete_exercise(ALICE.into(), "squat-barbell")
            .unwrap();
        assert_eq!(
            receipt.events,
            vec![Event::ExerciseDeleted {
                key: ExerciseKey::new("squat-barbell").unwrap()
            }]
        );
        assert!(matches!(registry.exercise("squat-barbell"), Err(ReadError::NotFound)));
        assert!(matches!(
            registry.delete_exercise(ALICE.into(), "squat-barbell"),
            Err(DeleteError::NotFound)
        ));
    }

    #[rstest]
    fn test_upsert_overwrites(mut registry: Registry) {
        registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        let update = ExerciseRequest {
            name: "Back Squat".to_string(),
            description: "High bar".to_string(),
            muscle_group: "LEGS".to_string(),
            ..squat()
        };
        registry.upsert_exercise(ALICE.into(), &update).unwrap();

        let exercise = registry.exercise("squat-barbell").unwrap();
        assert_eq!(exercise.name.as_str(), "Back Squat");
        assert_eq!(exercise.description, "High bar");
        assert_eq!(exercise.muscle_group, MuscleGroup::Legs);
        assert_eq!(registry.exercises().count(), 1);
    }

    #[rstest]
    fn test_upsert_transactions_differ(mut registry: Registry) {
        let first = registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        let second = registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        assert_ne!(first.transaction, second.transaction);
    }

    #[rstest]
    fn test_upsert_by_non_owner(mut registry: Registry) {
        let before = registry.clone();
        assert!(matches!(
            registry.upsert_exercise(BOB.into(), &squat()),
            Err(UpsertError::Unauthorized)
        ));
        assert_eq!(registry, before);
    }

    #[rstest]
    fn test_non_owner_checked_before_validation(mut registry: Registry) {
        let request = ExerciseRequest {
            category: "fake".to_string(),
            muscle_group: "fake".to_string(),
            ..biscep_curl()
        };
        assert!(matches!(
            registry.upsert_exercise(BOB.into(), &request),
            Err(UpsertError::Unauthorized)
        ));
        assert!(matches!(
            registry.add_exercise(BOB.into(), &request),
            Err(CreateError::Unauthorized)
        ));
    }

    #[rstest]
    #[case(ExerciseRequest { name: String::new(), ..squat() }, ValidationError::Empty(Field::Name))]
    #[case(
        ExerciseRequest { category: String::new(), ..squat() },
        ValidationError::Empty(Field::Category)
    )]
    #[case(
        ExerciseRequest { muscle_group: String::new(), ..squat() },
        ValidationError::Empty(Field::MuscleGroup)
    )]
    #[case(
        ExerciseRequest { category: "fake".to_string(), ..squat() },
        ValidationError::UnknownCategory("fake".to_string())
    )]
    #[case(
        ExerciseRequest { muscle_group: "fake".to_string(), ..squat() },
        ValidationError::UnknownMuscleGroup("fake".to_string())
    )]
    fn test_upsert_invalid(
        mut registry: Registry,
        #[case] request: ExerciseRequest,
        #[case] expected: ValidationError,
    ) {
        assert!(matches!(
            registry.upsert_exercise(ALICE.into(), &request),
            Err(UpsertError::Validation(error)) if error == expected
        ));
        assert_eq!(registry.exercises().count(), 0);
    }

    #[rstest]
    fn test_upsert_invalid_keeps_previous_record(mut registry: Registry) {
        registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        let invalid = ExerciseRequest {
            name: "Broken".to_string(),
            category: "fake".to_string(),
            ..squat()
        };
        assert!(registry.upsert_exercise(ALICE.into(), &invalid).is_err());
        assert_eq!(
            registry.exercise("squat-barbell").unwrap().name.as_str(),
            "Squat"
        );
    }

    #[test]
    fn test_upsert_unseeded_category() {
        let mut registry = Registry::new(
            ALICE.into(),
            Classifications::new([Category::Machine], [MuscleGroup::Back]),
        );
        assert!(matches!(
            registry.upsert_exercise(ALICE.into(), &squat()),
            Err(UpsertError::Validation(ValidationError::UnknownCategory(token))) if token == "BARBELL"
        ));
    }

    #[rstest]
    fn test_add_exercise(mut registry: Registry) {
        let receipt = registry.add_exercise(ALICE.into(), &biscep_curl()).unwrap();
        let [Event::ExerciseCreated(exercise)] = receipt.events.as_slice() else {
            panic!("unexpected events: {:?}", receipt.events);
        };
        assert_eq!(exercise.name.as_str(), "Biscep curl");
        assert_eq!(exercise.category, Category::Dumbbell);
        assert_eq!(exercise.muscle_group, MuscleGroup::Arms);

        let stored = registry.exercise("Biscep curl").unwrap();
        assert_eq!(stored.name.as_str(), "Biscep curl");
        assert_eq!(stored.description, "Arm exercise");
        assert_eq!(stored.category, Category::Dumbbell);
    }

    #[rstest]
    fn test_add_exercise_duplicate(mut registry: Registry) {
        registry.add_exercise(ALICE.into(), &biscep_curl()).unwrap();
        assert!(matches!(
            registry.add_exercise(ALICE.into(), &biscep_curl()),
            Err(CreateError::Conflict)
        ));
        assert_eq!(registry.exercises().count(), 1);
    }

    #[rstest]
    fn test_add_exercise_invalid(mut registry: Registry) {
        let request = ExerciseRequest {
            category: "fake".to_string(),
            ..biscep_curl()
        };
        assert!(matches!(
            registry.add_exercise(ALICE.into(), &request),
            Err(CreateError::Validation(ValidationError::UnknownCategory(_)))
        ));
    }

    #[rstest]
    fn test_delete_never_created(mut registry: Registry) {
        assert!(matches!(
            registry.delete_exercise(ALICE.into(), "deadlift"),
            Err(DeleteError::NotFound)
        ));
    }

    #[rstest]
    fn test_delete_by_non_owner(mut registry: Registry) {
        registry.upsert_exercise(ALICE.into(), &squat()).unwrap();
        assert!(matches!(
            registry.delete_exercise(BOB.into(), "squat-barbell"),
            Err(DeleteError::Unauthorized)
        ));
        assert!(registry.exercise("squat-barbell").is_ok());
    }

    #[test]
    fn test_restore() {
        let registry = Registry::restore(
            ALICE.into(),
            Classifications::default(),
            [squat(), biscep_curl()],
        )
        .unwrap();
        assert_eq!(
            registry
                .exercises()
                .map(|e| e.key.as_str())
                .collect::<Vec<_>>(),
            vec!["Biscep curl", "squat-barbell"]
        );
    }

    #[test]
    fn test_restore_duplicate_key() {
        assert_eq!(
            Registry::restore(
                ALICE.into(),
                Classifications::default(),
                [squat(), biscep_curl(), squat()],
            ),
            Err(ValidationError::DuplicateKey("squat-barbell".to_string()))
        );
    }

    #[test]
    fn test_restore_invalid() {
        assert_eq!(
            Registry::restore(
                ALICE.into(),
                Classifications::new([Category::Dumbbell], [MuscleGroup::Arms]),
                [biscep_curl(), squat()],
            ),
            Err(ValidationError::UnknownCategory("BARBELL".to_string()))
        );
    }
}
