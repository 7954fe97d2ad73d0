//! Hosted Table Service Client
//!
//! HTTP client for a PostgREST-compatible table API (`/rest/v1/<table>`).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use super::{DataStoreError, DataStoreResult, Query, Table, TableStore};
use crate::config::DataServiceConfig;

const PREFER: &str = "Prefer";

/// REST client for the hosted tables
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Build a client authenticated with the project's anon key
    pub fn new(config: &DataServiceConfig) -> DataStoreResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| DataStoreError::Config(format!("anon key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| DataStoreError::Config(format!("anon key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        self.client.request(method, self.table_url(table))
    }

    async fn send(&self, request: RequestBuilder) -> DataStoreResult<Response> {
        let response = request.send().await.map_err(map_err)?;
        check_status(response).await
    }

    /// Expect a non-empty representation array and return its first row
    async fn single_row(
        &self,
        response: Response,
        table: Table,
        id: &str,
    ) -> DataStoreResult<Value> {
        let rows: Vec<Value> = response.json().await.map_err(map_err)?;
        rows.into_iter().next().ok_or_else(|| DataStoreError::NotFound {
            table: table.name(),
            id: id.to_string(),
        })
    }
}

fn map_err(e: reqwest::Error) -> DataStoreError {
    if e.is_timeout() {
        DataStoreError::Timeout
    } else if e.is_connect() {
        DataStoreError::Unavailable
    } else if e.is_decode() {
        DataStoreError::Decode(e.to_string())
    } else {
        DataStoreError::Request(e)
    }
}

/// Turn a non-success response into [`DataStoreError::Api`], preferring
/// the service's `message` field over the raw body
async fn check_status(response: Response) -> DataStoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    Err(DataStoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Total from a `Content-Range` header such as `0-24/573` or `*/0`
pub(crate) fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl TableStore for RestStore {
    async fn select(&self, table: Table, query: &Query) -> DataStoreResult<Vec<Value>> {
        tracing::debug!(table = %table, filters = query.filters.len(), "select");

        let request = self.request(Method::GET, table).query(&query.to_params());
        let response = self.send(request).await?;
        response.json().await.map_err(map_err)
    }

    async fn insert(&self, table: Table, row: Value) -> DataStoreResult<Value> {
        tracing::debug!(table = %table, "insert");

        let request = self
            .request(Method::POST, table)
            .header(PREFER, "return=representation")
            .json(&row);
        let response = self.send(request).await?;
        let rows: Vec<Value> = response.json().await.map_err(map_err)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DataStoreError::Decode("insert returned no rows".to_string()))
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> DataStoreResult<Value> {
        tracing::debug!(table = %table, id, "update");

        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{}", id))])
            .header(PREFER, "return=representation")
            .json(&patch);
        let response = self.send(request).await?;
        self.single_row(response, table, id).await
    }

    async fn delete(&self, table: Table, id: &str) -> DataStoreResult<()> {
        tracing::debug!(table = %table, id, "delete");

        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{}", id))])
            .header(PREFER, "return=representation");
        let response = self.send(request).await?;
        self.single_row(response, table, id).await.map(|_| ())
    }

    async fn count(&self, table: Table, query: &Query) -> DataStoreResult<u64> {
        let params: Vec<(String, String)> = query
            .to_params()
            .into_iter()
            .filter(|(key, _)| key != "order" && key != "limit")
            .map(|(key, value)| {
                if key == "select" {
                    (key, "*".to_string())
                } else {
                    (key, value)
                }
            })
            .collect();

        let request = self
            .request(Method::HEAD, table)
            .query(&params)
            .header(PREFER, "count=exact");
        let response = self.send(request).await?;

        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DataStoreError::Decode("missing Content-Range header".to_string()))?;

        let total = parse_content_range(header).ok_or_else(|| {
            DataStoreError::Decode(format!("unparseable Content-Range: {}", header))
        })?;

        tracing::debug!(table = %table, total, "count");
        Ok(total)
    }

    async fn ping(&self) -> DataStoreResult<()> {
        let url = format!("{}/rest/v1/", self.base_url);
        self.send(self.client.get(url)).await.map(|_| ())
    }

    fn backend(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataBackend;
    use crate::datastore::Embed;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> RestStore {
        let config = DataServiceConfig {
            backend: DataBackend::Rest,
            url: format!("{}/", server.uri()),
            anon_key: "anon-test-key".to_string(),
            request_timeout_ms: 2000,
            seed_demo: false,
        };
        RestStore::new(&config).unwrap()
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-24/573"), Some(573));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-9/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[tokio::test]
    async fn test_select_sends_filters_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .and(header("apikey", "anon-test-key"))
            .and(header("authorization", "Bearer anon-test-key"))
            .and(query_param("select", "*,patients(name),doctors(name,specialty)"))
            .and(query_param("status", "eq.scheduled"))
            .and(query_param("order", "date.asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "a1", "status": "scheduled" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let query = Query::new()
            .eq("status", "scheduled")
            .order_by("date", true)
            .embed(Embed::Patient)
            .embed(Embed::Doctor);
        let rows = store(&server)
            .select(Table::Appointments, &query)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "a1");
    }

    #[tokio::test]
    async fn test_insert_returns_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/doctors"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!({ "name": "Ana" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([{ "id": "d1", "name": "Ana" }])),
            )
            .mount(&server)
            .await;

        let row = store(&server)
            .insert(Table::Doctors, json!({ "name": "Ana" }))
            .await
            .unwrap();
        assert_eq!(row["id"], "d1");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/patients"))
            .and(query_param("id", "eq.p9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = store(&server)
            .update(Table::Patients, "p9", json!({ "name": "X" }))
            .await
            .unwrap_err();
        assert!(matches!(err, DataStoreError::NotFound { table: "patients", .. }));
    }

    #[tokio::test]
    async fn test_count_reads_content_range() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/rest/v1/appointments"))
            .and(header("prefer", "count=exact"))
            .and(query_param("date", "eq.2025-04-10"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-6/7"))
            .mount(&server)
            .await;

        let total = store(&server)
            .count(
                Table::Appointments,
                &Query::new().eq("date", "2025-04-10").order_by("time", true),
            )
            .await
            .unwrap();
        assert_eq!(total, 7);
    }

    #[tokio::test]
    async fn test_api_error_uses_message_field() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/doctors"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23503",
                "message": "update or delete on table \"doctors\" violates foreign key constraint"
            })))
            .mount(&server)
            .await;

        let err = store(&server).delete(Table::Doctors, "d1").await.unwrap_err();
        match err {
            DataStoreError::Api { status, message } => {
                assert_eq!(status, 409);
                assert!(message.contains("foreign key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let config = DataServiceConfig {
            backend: DataBackend::Rest,
            url: "http://127.0.0.1:1".to_string(),
            anon_key: "k".to_string(),
            request_timeout_ms: 500,
            seed_demo: false,
        };
        let err = RestStore::new(&config).unwrap().ping().await.unwrap_err();
        assert!(matches!(
            err,
            DataStoreError::Unavailable | DataStoreError::Timeout | DataStoreError::Request(_)
        ));
    }
}
