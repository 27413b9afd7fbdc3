use std::{cell::Cell, num::NonZeroUsize};

use futures_util::{StreamExt, stream};
use log::{info, warn};
use serde::Deserialize;
use swoleth_domain::{AccountID, Classifications, ExerciseService, Registry, Service};
use swoleth_storage::{
    json_file::{JsonFile, JsonFileError},
    memory::InMemory,
};

use crate::{
    config::Config,
    report::{FailureKind, Outcome, Report, RowReport},
    row::Row,
};

/// How upsert requests are issued.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Dispatch {
    /// Each request completes before the next one is issued.
    #[default]
    Sequential,
    /// Up to `max_in_flight` requests are pending at the same time.
    Concurrent {
        #[serde(default = "default_max_in_flight")]
        max_in_flight: NonZeroUsize,
    },
}

fn default_max_in_flight() -> NonZeroUsize {
    NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN)
}

pub struct BulkLoader<S> {
    service: S,
    caller: AccountID,
    dispatch: Dispatch,
}

impl<S: ExerciseService> BulkLoader<S> {
    pub fn new(service: S, caller: AccountID, dispatch: Dispatch) -> Self {
        Self {
            service,
            caller,
            dispatch,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Upserts the exercise of every row.
    ///
    /// A failing row does not stop the remaining rows. The report lists all rows in input
    /// order, independent of the order in which the requests completed.
    pub async fn load(&self, rows: Vec<Row>) -> Report {
        let upserted = Cell::new(0);

        let reports = match self.dispatch {
            Dispatch::Sequential => {
                let mut reports = Vec::with_capacity(rows.len());
                for row in rows {
                    reports.push(self.load_row(row, &upserted).await);
                }
                reports
            }
            Dispatch::Concurrent { max_in_flight } => {
                stream::iter(rows)
                    .map(|row| self.load_row(row, &upserted))
                    .buffer_unordered(max_in_flight.get())
                    .collect::<Vec<_>>()
                    .await
            }
        };

        Report::new(reports)
    }

    async fn load_row(&self, row: Row, upserted: &Cell<usize>) -> RowReport {
        let request = match row.request {
            Ok(request) => request,
            Err(err) => {
                warn!("row {}: {err}", row.number);
                return RowReport {
                    row: row.number,
                    key: None,
                    outcome: Outcome::Failed {
                        kind: FailureKind::Parse,
                        reason: err.to_string(),
                    },
                };
            }
        };

        let key = request.key.clone();

        let outcome = match self.service.upsert_exercise(self.caller, request).await {
            Ok(receipt) => {
                upserted.set(upserted.get() + 1);
                info!(
                    "exercise #{} upserted with tx={}, row={}, key={key}",
                    upserted.get(),
                    receipt.transaction,
                    row.number
                );
                Outcome::Upserted {
                    transaction: receipt.transaction.to_string(),
                }
            }
            Err(err) => {
                warn!("row {}: failed to upsert exercise \"{key}\": {err}", row.number);
                Outcome::Failed {
                    kind: FailureKind::from(&err),
                    reason: err.to_string(),
                }
            }
        };

        RowReport {
            row: row.number,
            key: Some(key),
            outcome,
        }
    }
}

/// Loads the rows into the registry state file of the configuration.
///
/// A missing state file is deployed first. A dry run applies the rows to an in-memory copy of
/// the state, or to a fresh registry if there is no state file, and writes nothing.
pub async fn run(
    config: &Config,
    caller: AccountID,
    rows: Vec<Row>,
) -> Result<Report, JsonFileError> {
    let owner = config.owner(caller);

    if config.dry_run {
        let registry = if config.registry.exists() {
            JsonFile::read(&config.registry)?
        } else {
            Registry::new(owner, Classifications::default())
        };
        info!(
            "dry run, changes to {} are not persisted",
            config.registry.display()
        );
        let service = Service::new(InMemory::from(registry));
        Ok(BulkLoader::new(service, caller, config.dispatch)
            .load(rows)
            .await)
    } else {
        let storage = JsonFile::open_or_deploy(
            config.registry.clone(),
            owner,
            Classifications::default(),
        )?;
        Ok(BulkLoader::new(Service::new(storage), caller, config.dispatch)
            .load(rows)
            .await)
    }
}
