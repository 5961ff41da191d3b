//! Document database seam.
//!
//! Documents are JSON objects grouped into collections. The store stamps
//! each insert with a server-side creation time; live queries deliver the
//! full matching snapshot on subscribe and again after every change.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use invite_core::StoreError;
use serde_json::Value;
use std::fmt;

/// A document as returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned id.
    pub id: String,

    /// Document body.
    pub data: Value,

    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
}

/// Sort direction for creation-time ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// A live query over one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    /// Order by creation time, or store order if `None`.
    pub order_by_created: Option<SortDirection>,
}

impl Query {
    /// All documents of a collection in store order.
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            order_by_created: None,
        }
    }

    /// Order by creation time.
    pub fn order_by_created(mut self, direction: SortDirection) -> Self {
        self.order_by_created = Some(direction);
        self
    }

    /// Sort a snapshot the way this query asks for.
    pub fn apply(&self, docs: &mut [StoredDocument]) {
        match self.order_by_created {
            Some(SortDirection::Ascending) => docs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            Some(SortDirection::Descending) => docs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            None => {}
        }
    }
}

/// Callback receiving query snapshots.
pub type ChangeHandler = Box<dyn Fn(Vec<StoredDocument>) + Send + Sync>;

/// Remote document database (the guestbook).
pub trait DocumentStore: Send + Sync {
    /// Insert a document. Resolves to the new document id.
    fn insert(&self, collection: &str, data: Value) -> BoxFuture<'static, Result<String, StoreError>>;

    /// Register a live query. `on_change` receives the current snapshot
    /// immediately and after every change until the subscription is dropped.
    fn subscribe(&self, query: Query, on_change: ChangeHandler) -> Result<Subscription, StoreError>;
}

/// Handle to a live query. Dropping it unsubscribes.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Detach now instead of on drop.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
