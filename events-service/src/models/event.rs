use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};

/// Collection holding event documents.
pub const EVENTS_COLLECTION: &str = "events";

pub const ID_FIELD: &str = "_id";
pub const STATUS_FIELD: &str = "status";
pub const START_TIME_FIELD: &str = "startTime";

/// Status value selected by the approved-events listing.
pub const APPROVED_STATUS: &str = "approved";

/// Typed view over an event document.
///
/// Stored events are open documents; only `_id`, `status` and `startTime`
/// are known here. Everything else rides along in `extra` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: ObjectId,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub extra: Document,
}

impl EventRecord {
    pub fn new(status: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            status: status.into(),
            start_time,
            extra: Document::new(),
        }
    }

    pub fn approved(start_time: DateTime<Utc>) -> Self {
        Self::new(APPROVED_STATUS, start_time)
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.extra.insert(key, value);
        self
    }

    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.insert(ID_FIELD, self.id);
        doc.insert(STATUS_FIELD, self.status);
        doc.insert(START_TIME_FIELD, bson::DateTime::from_chrono(self.start_time));
        for (key, value) in self.extra {
            if !doc.contains_key(&key) {
                doc.insert(key, value);
            }
        }
        doc
    }
}

impl From<EventRecord> for Document {
    fn from(record: EventRecord) -> Self {
        record.into_document()
    }
}
