//! In-process event store backing the handler and fetcher tests.
//!
//! Filters match top-level fields by equality. Sorting is stable and follows
//! MongoDB's cross-type comparison order, with missing fields sorting as null.

use crate::services::store::{EventStore, FindQuery, SortOrder};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use service_core::error::AppError;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MockEventStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    failure: RwLock<Option<String>>,
    query_count: AtomicU64,
}

impl MockEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: RwLock::new(Some(message.into())),
            ..Self::default()
        }
    }

    pub async fn insert(&self, collection: &str, document: impl Into<Document>) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.into());
    }

    pub async fn insert_many<I, D>(&self, collection: &str, documents: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<Document>,
    {
        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection.to_string()).or_default();
        stored.extend(documents.into_iter().map(Into::into));
    }

    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }

    pub fn query_count(&self) -> u64 {
        self.query_count.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl EventStore for MockEventStore {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError> {
        self.query_count.fetch_add(1, AtomicOrdering::SeqCst);

        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(AppError::DatabaseError(anyhow::anyhow!(message.clone())));
        }

        let collections = self.collections.read().await;
        let mut matched: Vec<Document> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| matches_filter(doc, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.sort.is_empty() {
            matched.sort_by(|a, b| compare_by_sort(a, b, &query.sort));
        }

        tracing::debug!(
            collection = %collection,
            matched = matched.len(),
            "[MOCK] Query evaluated"
        );

        Ok(matched)
    }
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| match doc.get(field) {
            Some(actual) => values_equal(actual, expected),
            None => matches!(expected, Bson::Null),
        })
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_f64(a), as_f64(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_by_sort(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (field, direction) in sort {
        let order = match direction {
            Bson::Int32(v) => SortOrder::from_direction(*v),
            Bson::Int64(v) => SortOrder::from_direction(v.signum() as i32),
            Bson::Double(v) if *v < 0.0 => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };

        let ordering = compare_values(
            a.get(field).unwrap_or(&Bson::Null),
            b.get(field).unwrap_or(&Bson::Null),
        );
        let ordering = match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Rank of a value's type in MongoDB's comparison order.
fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::MinKey => 1,
        Bson::Null | Bson::Undefined => 2,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 3,
        Bson::String(_) | Bson::Symbol(_) => 4,
        Bson::Document(_) => 5,
        Bson::Array(_) => 6,
        Bson::Binary(_) => 7,
        Bson::ObjectId(_) => 8,
        Bson::Boolean(_) => 9,
        Bson::DateTime(_) => 10,
        Bson::Timestamp(_) => 11,
        Bson::RegularExpression(_) => 12,
        Bson::MaxKey => 14,
        _ => 13,
    }
}

fn compare_values(a: &Bson, b: &Bson) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }

    match (a, b) {
        (Bson::String(x) | Bson::Symbol(x), Bson::String(y) | Bson::Symbol(y)) => x.cmp(y),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
        (Bson::Timestamp(x), Bson::Timestamp(y)) => {
            (x.time, x.increment).cmp(&(y.time, y.increment))
        }
        _ => match (as_f64(a), as_f64(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}
