//! In-process table store
//!
//! Evaluates the same [`Query`] values as the REST client against JSON
//! rows held in memory. Used for offline runs (`backend = "memory"`) and
//! throughout the test suite.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DataStoreError, DataStoreResult, Query, Table, TableStore};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with rows (ids are kept as given)
    pub fn with_rows(rows: impl IntoIterator<Item = (Table, Value)>) -> Self {
        let mut tables: HashMap<Table, Vec<Value>> = HashMap::new();
        for (table, row) in rows {
            tables.entry(table).or_default().push(row);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// A small clinic with appointments spread around `today`
    pub fn with_demo_data(today: NaiveDate) -> Self {
        Self::with_rows(demo_rows(today))
    }

    fn embed(tables: &HashMap<Table, Vec<Value>>, query: &Query, mut row: Value) -> Value {
        for embed in &query.embeds {
            let related = row
                .get(embed.foreign_key())
                .and_then(Value::as_str)
                .and_then(|id| find(tables, embed.table(), id))
                .map(|found| {
                    let picked: Map<String, Value> = embed
                        .columns()
                        .iter()
                        .filter_map(|col| found.get(*col).map(|v| (col.to_string(), v.clone())))
                        .collect();
                    Value::Object(picked)
                })
                .unwrap_or(Value::Null);

            if let Value::Object(map) = &mut row {
                map.insert(embed.table().name().to_string(), related);
            }
        }
        row
    }
}

fn find<'a>(tables: &'a HashMap<Table, Vec<Value>>, table: Table, id: &str) -> Option<&'a Value> {
    tables
        .get(&table)?
        .iter()
        .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
}

fn not_found(table: Table, id: &str) -> DataStoreError {
    DataStoreError::NotFound {
        table: table.name(),
        id: id.to_string(),
    }
}

fn into_object(row: Value) -> DataStoreResult<Map<String, Value>> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(DataStoreError::InvalidRow(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> DataStoreResult<Vec<Value>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        query.sort(&mut rows);
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows
            .into_iter()
            .map(|row| Self::embed(&tables, query, row))
            .collect())
    }

    async fn insert(&self, table: Table, row: Value) -> DataStoreResult<Value> {
        let mut map = into_object(row)?;
        if !map.get("id").is_some_and(Value::is_string) {
            map.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        }
        map.entry("created_at")
            .or_insert_with(|| json!(Utc::now().to_rfc3339()));

        let row = Value::Object(map);
        self.tables
            .write()
            .await
            .entry(table)
            .or_default()
            .push(row.clone());

        tracing::debug!(table = %table, "memory insert");
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> DataStoreResult<Value> {
        let patch = into_object(patch)?;
        let mut tables = self.tables.write().await;

        let row = tables
            .get_mut(&table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| not_found(table, id))?;

        if let Some(map) = row.as_object_mut() {
            for (key, value) in patch {
                if key != "id" {
                    map.insert(key, value);
                }
            }
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: Table, id: &str) -> DataStoreResult<()> {
        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(&table).ok_or_else(|| not_found(table, id))?;

        let before = rows.len();
        rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
        if rows.len() == before {
            return Err(not_found(table, id));
        }
        Ok(())
    }

    async fn count(&self, table: Table, query: &Query) -> DataStoreResult<u64> {
        let tables = self.tables.read().await;
        let total = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).count())
            .unwrap_or(0);
        Ok(total as u64)
    }

    async fn ping(&self) -> DataStoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

fn day(today: NaiveDate, offset: i64) -> String {
    (today + Duration::days(offset)).format("%Y-%m-%d").to_string()
}

fn demo_rows(today: NaiveDate) -> Vec<(Table, Value)> {
    let mut rows = vec![
        (
            Table::Doctors,
            json!({ "id": "doc-maria", "name": "Dra. Maria Silva", "email": "maria.silva@medappt.com",
                    "specialty": "cardiologia", "phone": "(11) 98765-4321",
                    "bio": "Cardiologista com 15 anos de experiência." }),
        ),
        (
            Table::Doctors,
            json!({ "id": "doc-carlos", "name": "Dr. Carlos Mendes", "email": "carlos.mendes@medappt.com",
                    "specialty": "ortopedia", "phone": "(11) 91234-5678" }),
        ),
        (
            Table::Doctors,
            json!({ "id": "doc-ana", "name": "Dra. Ana Costa", "email": "ana.costa@medappt.com",
                    "specialty": "pediatria" }),
        ),
        (
            Table::Doctors,
            json!({ "id": "doc-paulo", "name": "Dr. Paulo Ribeiro", "email": "paulo.ribeiro@medappt.com",
                    "specialty": "dermatologia" }),
        ),
        (
            Table::Patients,
            json!({ "id": "pat-joao", "name": "João Souza", "email": "joao.souza@email.com",
                    "cpf": "123.456.789-01", "phone": "(11) 99999-1111",
                    "date_of_birth": "1985-06-15", "health_insurance": "Unimed" }),
        ),
        (
            Table::Patients,
            json!({ "id": "pat-fernanda", "name": "Fernanda Lima", "email": "fernanda.lima@email.com",
                    "cpf": "987.654.321-00", "health_insurance": "Bradesco Saúde" }),
        ),
        (
            Table::Patients,
            json!({ "id": "pat-ricardo", "name": "Ricardo Alves", "email": "ricardo.alves@email.com",
                    "cpf": "456.789.123-45" }),
        ),
        (
            Table::Profiles,
            json!({ "id": "usr-admin", "profile_id": null, "role": "admin" }),
        ),
        (
            Table::Profiles,
            json!({ "id": "usr-maria", "profile_id": "doc-maria", "role": "doctor" }),
        ),
        (
            Table::Profiles,
            json!({ "id": "usr-joao", "profile_id": "pat-joao", "role": "patient" }),
        ),
        (
            Table::MedicalRecords,
            json!({ "id": "rec-1", "patient_id": "pat-joao", "doctor_id": "doc-maria",
                    "date": day(today, -30), "diagnosis": "Hipertensão arterial leve",
                    "prescription": "Losartana 50mg, 1x ao dia" }),
        ),
    ];

    // Weekday mornings for Maria, Monday/Wednesday afternoons for Carlos
    for weekday in 1..=5u8 {
        rows.push((
            Table::DoctorAvailability,
            json!({ "id": format!("av-maria-{}", weekday), "doctor_id": "doc-maria",
                    "day_of_week": weekday, "start_time": "08:00:00", "end_time": "12:00:00" }),
        ));
    }
    for weekday in [1u8, 3] {
        rows.push((
            Table::DoctorAvailability,
            json!({ "id": format!("av-carlos-{}", weekday), "doctor_id": "doc-carlos",
                    "day_of_week": weekday, "start_time": "14:00:00", "end_time": "17:00:00" }),
        ));
    }

    let appointments = [
        ("apt-1", "pat-joao", "doc-maria", -7, "09:00:00", "completed"),
        ("apt-2", "pat-fernanda", "doc-carlos", -2, "14:30:00", "cancelled"),
        ("apt-3", "pat-joao", "doc-maria", 0, "10:00:00", "confirmed"),
        ("apt-4", "pat-ricardo", "doc-ana", 0, "15:00:00", "scheduled"),
        ("apt-5", "pat-fernanda", "doc-paulo", 3, "08:30:00", "scheduled"),
        ("apt-6", "pat-ricardo", "doc-carlos", 8, "16:00:00", "scheduled"),
    ];
    for (id, patient, doctor, offset, time, status) in appointments {
        rows.push((
            Table::Appointments,
            json!({ "id": id, "patient_id": patient, "doctor_id": doctor, "date": day(today, offset),
                    "time": time, "status": status }),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::Embed;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let row = store
            .insert(Table::Doctors, json!({ "name": "Ana" }))
            .await
            .unwrap();

        assert!(row["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(row["created_at"].is_string());
        assert_eq!(store.count(Table::Doctors, &Query::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object() {
        let store = MemoryStore::new();
        let err = store.insert(Table::Doctors, json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, DataStoreError::InvalidRow(_)));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_id() {
        let store = MemoryStore::with_demo_data(today());
        let row = store
            .update(
                Table::Doctors,
                "doc-ana",
                json!({ "id": "other", "phone": "(11) 90000-0000" }),
            )
            .await
            .unwrap();

        assert_eq!(row["id"], "doc-ana");
        assert_eq!(row["phone"], "(11) 90000-0000");
        assert_eq!(row["specialty"], "pediatria");

        let err = store
            .update(Table::Doctors, "missing", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DataStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::with_demo_data(today());
        store.delete(Table::Patients, "pat-ricardo").await.unwrap();
        assert_eq!(store.count(Table::Patients, &Query::new()).await.unwrap(), 2);
        assert!(store.delete(Table::Patients, "pat-ricardo").await.is_err());
    }

    #[tokio::test]
    async fn test_select_filters_orders_and_embeds() {
        let store = MemoryStore::with_demo_data(today());
        let query = Query::new()
            .eq("date", "2025-04-09")
            .order_by("time", false)
            .embed(Embed::Patient)
            .embed(Embed::Doctor);

        let rows = store.select(Table::Appointments, &query).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "apt-4");
        assert_eq!(rows[0]["patients"]["name"], "Ricardo Alves");
        assert_eq!(rows[0]["doctors"]["specialty"], "pediatria");
        assert!(rows[0]["doctors"].get("email").is_none());
    }

    #[tokio::test]
    async fn test_embed_missing_relation_is_null() {
        let store = MemoryStore::with_rows([(
            Table::Appointments,
            json!({ "id": "a1", "patient_id": "gone", "doctor_id": "gone", "date": "2025-04-09",
                    "time": "08:00", "status": "scheduled" }),
        )]);
        let rows = store
            .select(Table::Appointments, &Query::new().embed(Embed::Patient))
            .await
            .unwrap();
        assert!(rows[0]["patients"].is_null());
    }

    #[tokio::test]
    async fn test_count_with_filters() {
        let store = MemoryStore::with_demo_data(today());
        let upcoming = Query::new()
            .gte("date", "2025-04-09")
            .in_list("status", ["scheduled", "confirmed"]);
        assert_eq!(store.count(Table::Appointments, &upcoming).await.unwrap(), 4);
        assert_eq!(store.count(Table::Appointments, &Query::new()).await.unwrap(), 6);
    }
}
