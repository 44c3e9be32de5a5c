use events_service::config::EventsConfig;
use events_service::handlers::handle_approved_events;
use events_service::services::MongoEventStore;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use service_core::lambda::ApiGatewayResponse;
use service_core::observability::init_tracing;
use tracing::Instrument;

async fn handle_request(
    store: &MongoEventStore,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    Ok(handle_approved_events(store, event.payload)
        .instrument(span)
        .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = EventsConfig::load()?;

    init_tracing(
        "events-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    // One client per execution environment, created by the first invocation.
    let store = MongoEventStore::new(config.mongodb.uri, config.mongodb.database);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_request(&store, event)
    }))
    .await
}
