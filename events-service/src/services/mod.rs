pub mod database;
pub mod encoder;
pub mod fetcher;
pub mod mock_store;
pub mod store;

pub use database::MongoEventStore;
pub use encoder::encode_events;
pub use fetcher::{approved_events_query, fetch_approved_events, FetchOutcome};
pub use mock_store::MockEventStore;
pub use store::{EventStore, FindQuery, SortOrder};
