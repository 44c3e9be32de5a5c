#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use events_service::models::{EventRecord, EVENTS_COLLECTION};
use events_service::services::MockEventStore;
use mongodb::bson::oid::ObjectId;
use service_core::lambda::ApiGatewayResponse;

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Store seeded with the A/B/C scenario:
/// A approved on Jan 2, B pending on Jan 1, C approved on Jan 1.
pub struct SeededStore {
    pub store: MockEventStore,
    pub a: ObjectId,
    pub b: ObjectId,
    pub c: ObjectId,
}

impl SeededStore {
    pub async fn new() -> Self {
        let store = MockEventStore::new();
        let a = EventRecord::approved(day(2024, 1, 2)).with_field("title", "A");
        let b = EventRecord::new("pending", day(2024, 1, 1)).with_field("title", "B");
        let c = EventRecord::approved(day(2024, 1, 1)).with_field("title", "C");
        let (a_id, b_id, c_id) = (a.id, b.id, c.id);

        store.insert_many(EVENTS_COLLECTION, vec![a, b, c]).await;

        SeededStore {
            store,
            a: a_id,
            b: b_id,
            c: c_id,
        }
    }
}

pub fn parse_body(response: &ApiGatewayResponse) -> serde_json::Value {
    serde_json::from_str(&response.body).expect("Response body is not valid JSON")
}
