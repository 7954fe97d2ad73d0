//! Hosted Data Service
//!
//! All persistence, filtering and counting is delegated to a hosted
//! table service. [`TableStore`] is the seam: [`RestStore`] speaks the
//! PostgREST dialect over HTTP, [`MemoryStore`] evaluates the same
//! queries in-process for offline runs and tests.
//!
//! Rows cross this boundary as JSON objects with the table's own
//! (snake_case) column names; typed conversion happens in `clinic`.

mod client;
mod error;
mod memory;
mod query;

pub use client::RestStore;
pub use error::{DataStoreError, DataStoreResult};
pub use memory::MemoryStore;
pub use query::{Embed, Filter, Op, Order, Query};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::{DataBackend, DataServiceConfig};

/// Tables exposed by the data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Appointments,
    Doctors,
    Patients,
    MedicalRecords,
    DoctorAvailability,
    Profiles,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Appointments,
        Table::Doctors,
        Table::Patients,
        Table::MedicalRecords,
        Table::DoctorAvailability,
        Table::Profiles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Appointments => "appointments",
            Table::Doctors => "doctors",
            Table::Patients => "patients",
            Table::MedicalRecords => "medical_records",
            Table::DoctorAvailability => "doctor_availability",
            Table::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row-level access to the hosted tables.
///
/// One call is one remote round trip. Rows are keyed by their `id`
/// column.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Rows matching `query`
    async fn select(&self, table: Table, query: &Query) -> DataStoreResult<Vec<Value>>;

    /// Insert one row, returning it as stored (with `id` and `created_at`)
    async fn insert(&self, table: Table, row: Value) -> DataStoreResult<Value>;

    /// Apply `patch` to the row with `id`, returning the updated row
    async fn update(&self, table: Table, id: &str, patch: Value) -> DataStoreResult<Value>;

    async fn delete(&self, table: Table, id: &str) -> DataStoreResult<()>;

    /// Exact number of rows matching `query` (order, limit and embeds ignored)
    async fn count(&self, table: Table, query: &Query) -> DataStoreResult<u64>;

    /// Cheap reachability check
    async fn ping(&self) -> DataStoreResult<()>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// Decode JSON rows into typed `*Row` structs
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> DataStoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(DataStoreError::from))
        .collect()
}

pub fn decode_row<T: DeserializeOwned>(row: Value) -> DataStoreResult<T> {
    Ok(serde_json::from_value(row)?)
}

/// Serialize a payload into a JSON object row
pub fn encode_row<T: Serialize>(payload: &T) -> DataStoreResult<Value> {
    match serde_json::to_value(payload)? {
        row @ Value::Object(_) => Ok(row),
        other => Err(DataStoreError::InvalidRow(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Build the store selected by configuration
pub fn connect(config: &DataServiceConfig) -> DataStoreResult<Arc<dyn TableStore>> {
    match config.backend {
        DataBackend::Rest => Ok(Arc::new(RestStore::new(config)?)),
        DataBackend::Memory => {
            let store = if config.seed_demo {
                MemoryStore::with_demo_data(chrono::Local::now().date_naive())
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store))
        }
    }
}
