//! Clinic Data Access
//!
//! Typed operations over the hosted tables. Each operation is one remote
//! call, plus a lookup where a status transition needs the current row.
//! Forms are validated before anything is sent.

mod appointments;
mod availability;
mod doctors;
mod patients;
mod profiles;
mod records;

pub use appointments::AppointmentFilter;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::datastore::{self, DataStoreError, Query, Table, TableStore};
use crate::forms::ValidationErrors;
use crate::model::AppointmentStatus;

/// Errors from clinic operations
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Data service error: {0}")]
    DataStore(DataStoreError),
}

impl From<DataStoreError> for ClinicError {
    fn from(err: DataStoreError) -> Self {
        match err {
            DataStoreError::NotFound { table, id } => ClinicError::NotFound { entity: table, id },
            other => ClinicError::DataStore(other),
        }
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;

/// Data-access facade shared by the API handlers
#[derive(Clone)]
pub struct Clinic {
    store: Arc<dyn TableStore>,
}

impl Clinic {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TableStore> {
        &self.store
    }

    /// Select rows and convert them through their `*Row` type
    async fn fetch<R, T>(&self, table: Table, query: &Query) -> ClinicResult<Vec<T>>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let rows = self.store.select(table, query).await?;
        Ok(datastore::decode_rows::<R>(rows)?
            .into_iter()
            .map(T::from)
            .collect())
    }

    /// Single row by id
    async fn fetch_one<R, T>(&self, table: Table, id: &str, query: Query) -> ClinicResult<T>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let query = query.eq("id", id).limit(1);
        self.fetch::<R, T>(table, &query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ClinicError::NotFound {
                entity: table.name(),
                id: id.to_string(),
            })
    }

    async fn insert<P, R, T>(&self, table: Table, payload: &P) -> ClinicResult<T>
    where
        P: Serialize,
        R: DeserializeOwned,
        T: From<R>,
    {
        let row = self.store.insert(table, datastore::encode_row(payload)?).await?;
        let created: R = datastore::decode_row(row)?;
        Ok(T::from(created))
    }

    async fn patch<P, R, T>(&self, table: Table, id: &str, payload: &P) -> ClinicResult<T>
    where
        P: Serialize,
        R: DeserializeOwned,
        T: From<R>,
    {
        let row = self
            .store
            .update(table, id, datastore::encode_row(payload)?)
            .await?;
        let updated: R = datastore::decode_row(row)?;
        Ok(T::from(updated))
    }

    async fn remove(&self, table: Table, id: &str) -> ClinicResult<()> {
        self.store.delete(table, id).await?;
        tracing::info!(table = %table, id, "Deleted row");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::datastore::MemoryStore;
    use chrono::NaiveDate;

    /// Wednesday 2025-04-09
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    pub fn demo_clinic() -> Clinic {
        Clinic::new(Arc::new(MemoryStore::with_demo_data(today())))
    }

    pub fn empty_clinic() -> Clinic {
        Clinic::new(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_entity() {
        let err: ClinicError = DataStoreError::NotFound {
            table: "doctors",
            id: "d1".to_string(),
        }
        .into();
        assert!(matches!(err, ClinicError::NotFound { entity: "doctors", .. }));
        assert_eq!(err.to_string(), "doctors not found: d1");

        let err: ClinicError = DataStoreError::Timeout.into();
        assert!(matches!(err, ClinicError::DataStore(DataStoreError::Timeout)));
    }

    #[test]
    fn test_transition_message() {
        let err = ClinicError::InvalidTransition {
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change appointment status from completed to cancelled"
        );
    }
}
