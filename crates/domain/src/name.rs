use derive_more::{AsRef, Display};

use crate::{Field, ValidationError};

/// Human-readable exercise name.
///
/// The value is stored exactly as given, but a blank value is rejected.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.trim().is_empty() {
            return Err(NameError::Empty);
        }

        Ok(Name(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}

impl From<NameError> for ValidationError {
    fn from(value: NameError) -> Self {
        match value {
            NameError::Empty => ValidationError::Empty(Field::Name),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Squat", Ok(Name("Squat".to_string())))]
    #[case("Biscep curl", Ok(Name("Biscep curl".to_string())))]
    #[case(" Bench Press ", Ok(Name(" Bench Press ".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[test]
    fn test_validation_error_from_name_error() {
        assert_eq!(
            ValidationError::from(NameError::Empty),
            ValidationError::Empty(Field::Name)
        );
    }
}
