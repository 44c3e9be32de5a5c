//! service-core: Shared infrastructure for serverless functions.
pub mod config;
pub mod error;
pub mod json;
pub mod lambda;
pub mod observability;

pub use mongodb;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
