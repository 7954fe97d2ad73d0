//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

use crate::clinic::Clinic;
use crate::config::ApiConfig;
use crate::datastore::TableStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Typed access to the hosted tables
    pub clinic: Clinic,
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Pinned calendar date; `None` follows the local clock
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, config: ApiConfig) -> Self {
        Self {
            clinic: Clinic::new(store),
            config: Arc::new(config),
            start_time: Instant::now(),
            today: None,
        }
    }

    /// Pin "today" (booking rules and dashboard counts depend on it)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn store(&self) -> &Arc<dyn TableStore> {
        self.clinic.store()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
