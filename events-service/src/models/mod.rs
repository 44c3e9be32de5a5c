pub mod event;

pub use event::{
    EventRecord, APPROVED_STATUS, EVENTS_COLLECTION, ID_FIELD, START_TIME_FIELD, STATUS_FIELD,
};
