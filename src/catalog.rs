use thiserror::Error;

use crate::models::{EventRecord, QueryCriteria};
use crate::query::EventFilter;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Storage(#[from] rusqlite::Error),
    #[error("corrupt event row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of event records.
pub trait EventCatalog {
    /// Every record, in storage order.
    fn load(&self) -> Result<Vec<EventRecord>, CatalogError>;

    /// Records matching `criteria`, in storage order.
    fn query(&self, criteria: &QueryCriteria) -> Result<Vec<EventRecord>, CatalogError> {
        Ok(EventFilter::from_criteria(criteria).apply(self.load()?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    events: Vec<EventRecord>,
}

impl InMemoryCatalog {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }
}

impl EventCatalog for InMemoryCatalog {
    fn load(&self) -> Result<Vec<EventRecord>, CatalogError> {
        Ok(self.events.clone())
    }
}
