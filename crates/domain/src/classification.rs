use std::collections::BTreeSet;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Field, ValidationError};

#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Barbell,
    Bodyweight,
    Cable,
    Dumbbell,
    Kettlebell,
    Machine,
}

#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MuscleGroup {
    Arms,
    Back,
    Chest,
    Core,
    Legs,
    Shoulders,
}

/// Categories and muscle groups a registry accepts.
///
/// The sets are fixed when the registry is created. A token is only valid if it names a
/// known member that is also part of the seeded set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifications {
    categories: BTreeSet<Category>,
    muscle_groups: BTreeSet<MuscleGroup>,
}

impl Classifications {
    pub fn new(
        categories: impl IntoIterator<Item = Category>,
        muscle_groups: impl IntoIterator<Item = MuscleGroup>,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            muscle_groups: muscle_groups.into_iter().collect(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn muscle_groups(&self) -> impl Iterator<Item = MuscleGroup> + '_ {
        self.muscle_groups.iter().copied()
    }

    #[must_use]
    pub fn category(&self, token: &str) -> Option<Category> {
        token
            .parse::<Category>()
            .ok()
            .filter(|category| self.categories.contains(category))
    }

    #[must_use]
    pub fn muscle_group(&self, token: &str) -> Option<MuscleGroup> {
        token
            .parse::<MuscleGroup>()
            .ok()
            .filter(|muscle_group| self.muscle_groups.contains(muscle_group))
    }

    pub fn validate_category(&self, token: &str) -> Result<Category, ValidationError> {
        if token.trim().is_empty() {
            return Err(ValidationError::Empty(Field::Category));
        }
        self.category(token)
            .ok_or_else(|| ValidationError::UnknownCategory(token.to_string()))
    }

    pub fn validate_muscle_group(&self, token: &str) -> Result<MuscleGroup, ValidationError> {
        if token.trim().is_empty() {
            return Err(ValidationError::Empty(Field::MuscleGroup));
        }
        self.muscle_group(token)
            .ok_or_else(|| ValidationError::UnknownMuscleGroup(token.to_string()))
    }
}

impl Default for Classifications {
    fn default() -> Self {
        Self::new(Category::iter(), MuscleGroup::iter())
    }
}
