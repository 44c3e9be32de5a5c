use crate::services::{encode_events, fetch_approved_events, EventStore};
use serde_json::Value;
use service_core::error::AppError;
use service_core::lambda::ApiGatewayResponse;
use tracing::instrument;

/// List approved events, oldest start time first.
///
/// Always produces an envelope: 200 with the encoded array, or 500 with a
/// generic error body. The invocation payload is accepted but not read.
#[instrument(skip_all)]
pub async fn handle_approved_events(store: &dyn EventStore, _event: Value) -> ApiGatewayResponse {
    match approved_events_body(store).await {
        Ok(body) => ApiGatewayResponse::ok(body),
        Err(e) => {
            tracing::error!(error = %e, "Error occurred");
            e.into()
        }
    }
}

async fn approved_events_body(store: &dyn EventStore) -> Result<String, AppError> {
    tracing::info!("Attempting to connect to MongoDB and fetch documents");

    let outcome = fetch_approved_events(store).await;
    if outcome.is_degraded() {
        tracing::warn!("Serving empty event list after store failure");
    }

    let events = outcome.into_events();
    tracing::info!(count = events.len(), "Fetched {} events", events.len());

    Ok(encode_events(&events)?)
}
