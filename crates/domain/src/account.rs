use derive_more::{Deref, Display};
use uuid::Uuid;

#[derive(Deref, Debug, Display, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountID(Uuid);

impl AccountID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for AccountID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for AccountID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
