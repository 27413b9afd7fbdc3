use serde::Serialize;
use swoleth_domain::UpsertError;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<RowReport>,
}

impl Report {
    /// Orders the row reports by row number.
    #[must_use]
    pub fn new(mut rows: Vec<RowReport>) -> Self {
        rows.sort_by_key(|r| r.row);
        Self { rows }
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Upserted { .. }))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Upserted { transaction: String },
    Failed { kind: FailureKind, reason: String },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Parse,
    Unauthorized,
    Validation,
    Storage,
}

impl From<&UpsertError> for FailureKind {
    fn from(value: &UpsertError) -> Self {
        match value {
            UpsertError::Unauthorized => FailureKind::Unauthorized,
            UpsertError::Validation(_) => FailureKind::Validation,
            UpsertError::Storage(_) => FailureKind::Storage,
        }
    }
}
