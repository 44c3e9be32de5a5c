//! Approved-events query with a fail-open policy.
//!
//! Store failures never leave this module: they are logged and the fetch
//! degrades to an empty result. Callers that care can still tell a degraded
//! fetch from a genuinely empty one through [`FetchOutcome`].

use crate::models::{APPROVED_STATUS, EVENTS_COLLECTION, START_TIME_FIELD, STATUS_FIELD};
use crate::services::store::{EventStore, FindQuery, SortOrder};
use mongodb::bson::Document;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Vec<Document>),
    /// The store failed; `reason` is the logged error text.
    Degraded { reason: String },
}

impl FetchOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchOutcome::Degraded { .. })
    }

    /// Events to serve. A degraded fetch yields none.
    pub fn into_events(self) -> Vec<Document> {
        match self {
            FetchOutcome::Fetched(events) => events,
            FetchOutcome::Degraded { .. } => Vec::new(),
        }
    }
}

/// `status == "approved"`, ascending by start time.
pub fn approved_events_query() -> FindQuery {
    let mut filter = Document::new();
    filter.insert(STATUS_FIELD, APPROVED_STATUS);
    FindQuery::new(filter).sort_by(START_TIME_FIELD, SortOrder::Ascending)
}

#[instrument(skip(store))]
pub async fn fetch_approved_events(store: &dyn EventStore) -> FetchOutcome {
    match store.find(EVENTS_COLLECTION, approved_events_query()).await {
        Ok(events) => FetchOutcome::Fetched(events),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching events");
            FetchOutcome::Degraded {
                reason: e.to_string(),
            }
        }
    }
}
