//! Data-service error types

use thiserror::Error;

/// Errors from a [`TableStore`](super::TableStore) call.
///
/// Every failure is terminal for that call; nothing is retried.
#[derive(Error, Debug)]
pub enum DataStoreError {
    /// Could not reach the service
    #[error("Data service unavailable")]
    Unavailable,

    #[error("Data service request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Data service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No row with that id
    #[error("No row in {table} with id {id}")]
    NotFound { table: &'static str, id: String },

    /// Response body or header did not have the expected shape
    #[error("Malformed data service response: {0}")]
    Decode(String),

    /// Client could not be built from configuration
    #[error("Invalid data service configuration: {0}")]
    Config(String),

    /// Row payload was not a JSON object
    #[error("Invalid row payload: {0}")]
    InvalidRow(String),
}

impl From<serde_json::Error> for DataStoreError {
    fn from(err: serde_json::Error) -> Self {
        DataStoreError::Decode(err.to_string())
    }
}

/// Result type alias for data-service calls
pub type DataStoreResult<T> = Result<T, DataStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataStoreError::NotFound {
            table: "doctors",
            id: "d9".to_string(),
        };
        assert_eq!(err.to_string(), "No row in doctors with id d9");

        let err = DataStoreError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "Data service error (401): Invalid API key");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: DataStoreError = json_err.into();
        assert!(matches!(err, DataStoreError::Decode(_)));
    }
}
