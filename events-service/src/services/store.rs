//! Data-store collaborator consumed by the event fetcher.

use async_trait::async_trait;
use mongodb::bson::Document;
use service_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// MongoDB sort specification value.
    pub fn as_i32(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    pub fn from_direction(value: i32) -> Self {
        if value < 0 {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// Filter plus ordered sort keys, applied to a single collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Document,
}

impl FindQuery {
    pub fn new(filter: Document) -> Self {
        Self {
            filter,
            sort: Document::new(),
        }
    }

    pub fn sort_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort.insert(field, order.as_i32());
        self
    }
}

/// Source of event documents.
///
/// `find` materializes the whole result set, in sort order.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_sort_by_keeps_key_order() {
        let query = FindQuery::new(doc! { "status": "approved" })
            .sort_by("startTime", SortOrder::Ascending)
            .sort_by("title", SortOrder::Descending);

        assert_eq!(query.sort, doc! { "startTime": 1, "title": -1 });
    }

    #[test]
    fn test_sort_order_from_direction() {
        assert_eq!(SortOrder::from_direction(1), SortOrder::Ascending);
        assert_eq!(SortOrder::from_direction(-1), SortOrder::Descending);
    }
}
