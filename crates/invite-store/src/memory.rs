//! In-memory data sources.
//!
//! Behave like the remote services closely enough for tests and the
//! headless host: prefix listing, live snapshots, server timestamps, and
//! switchable failure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::BoxFuture;
use invite_core::{ObjectRef, StoreError};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use uuid::Uuid;

use crate::document::{ChangeHandler, DocumentStore, Query, StoredDocument, Subscription};
use crate::object::ObjectStore;

// =============================================================================
// Object Store
// =============================================================================

/// Object store backed by a list of paths.
pub struct MemoryObjectStore {
    base_url: String,
    paths: RwLock<Vec<String>>,
    failing: AtomicBool,
}

impl MemoryObjectStore {
    /// Create an empty store serving URLs under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            paths: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Add an object.
    pub fn put(&self, path: impl Into<String>) {
        self.paths.write().push(path.into());
    }

    /// Make every call fail with a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("object store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ObjectStore for MemoryObjectStore {
    fn list(&self, prefix: &str) -> BoxFuture<'static, Result<Vec<ObjectRef>, StoreError>> {
        let result = self.check().map(|_| {
            self.paths
                .read()
                .iter()
                .filter(|p| {
                    p.strip_prefix(prefix)
                        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
                })
                .map(|p| ObjectRef::new(p.as_str()))
                .collect()
        });
        Box::pin(async move { result })
    }

    fn download_url(&self, object: &ObjectRef) -> BoxFuture<'static, Result<String, StoreError>> {
        let result = self.check().and_then(|_| {
            if self.paths.read().contains(&object.full_path) {
                Ok(format!(
                    "{}/{}?alt=media",
                    self.base_url.trim_end_matches('/'),
                    object.full_path.replace('/', "%2F")
                ))
            } else {
                Err(StoreError::NotFound(object.full_path.clone()))
            }
        });
        Box::pin(async move { result })
    }
}

// =============================================================================
// Document Store
// =============================================================================

/// Document store with live queries.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<DocumentInner>,
}

#[derive(Default)]
struct DocumentInner {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
    subscribers: Mutex<HashMap<Uuid, Subscriber>>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
    failing: AtomicBool,
}

struct Subscriber {
    query: Query,
    on_change: Arc<ChangeHandler>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts and new subscriptions fail with a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("document store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DocumentInner {
    /// Strictly increasing server timestamp.
    fn stamp(&self) -> DateTime<Utc> {
        let mut last = self.last_stamp.lock();
        let mut now = Utc::now();
        if let Some(prev) = *last {
            if now <= prev {
                now = prev + ChronoDuration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }

    fn snapshot(&self, query: &Query) -> Vec<StoredDocument> {
        let mut docs = self
            .collections
            .read()
            .get(&query.collection)
            .cloned()
            .unwrap_or_default();
        query.apply(&mut docs);
        docs
    }

    fn notify(&self, collection: &str) {
        // Collect first so handlers run without the subscriber lock held
        let targets: Vec<(Query, Arc<ChangeHandler>)> = self
            .subscribers
            .lock()
            .values()
            .filter(|s| s.query.collection == collection)
            .map(|s| (s.query.clone(), s.on_change.clone()))
            .collect();

        for (query, on_change) in targets {
            on_change(self.snapshot(&query));
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn insert(&self, collection: &str, data: Value) -> BoxFuture<'static, Result<String, StoreError>> {
        let result = self.check().and_then(|_| {
            if !data.is_object() {
                return Err(StoreError::InvalidDocument(format!(
                    "expected an object, got {}",
                    data
                )));
            }

            let doc = StoredDocument {
                id: Uuid::new_v4().to_string(),
                data,
                created_at: self.inner.stamp(),
            };
            let id = doc.id.clone();
            self.inner
                .collections
                .write()
                .entry(collection.to_string())
                .or_default()
                .push(doc);

            tracing::debug!("Inserted {} into {}", id, collection);
            self.inner.notify(collection);
            Ok(id)
        });
        Box::pin(async move { result })
    }

    fn subscribe(&self, query: Query, on_change: ChangeHandler) -> Result<Subscription, StoreError> {
        self.check()?;

        let id = Uuid::new_v4();
        let on_change = Arc::new(on_change);
        self.inner.subscribers.lock().insert(
            id,
            Subscriber {
                query: query.clone(),
                on_change: on_change.clone(),
            },
        );
        on_change(self.inner.snapshot(&query));

        let inner: Weak<DocumentInner> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers.lock().remove(&id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SortDirection;
    use serde_json::json;

    #[tokio::test]
    async fn test_object_listing_is_shallow() {
        let store = MemoryObjectStore::new("https://cdn.example");
        store.put("originals/snap/1.jpg");
        store.put("originals/snap/2.jpg");
        store.put("originals/snap/thumbs/1.jpg");
        store.put("profiles/jini.jpg");

        let listed = store.list("originals/snap/").await.unwrap();
        let names: Vec<_> = listed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["1.jpg", "2.jpg"]);
    }

    #[tokio::test]
    async fn test_download_url() {
        let store = MemoryObjectStore::new("https://cdn.example/");
        store.put("originals/snap/1.jpg");

        let url = store
            .download_url(&ObjectRef::new("originals/snap/1.jpg"))
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example/originals%2Fsnap%2F1.jpg?alt=media");

        let missing = store.download_url(&ObjectRef::new("nope.jpg")).await;
        assert_eq!(missing, Err(StoreError::NotFound("nope.jpg".to_string())));
    }

    #[tokio::test]
    async fn test_object_store_failure() {
        let store = MemoryObjectStore::new("https://cdn.example");
        store.set_failing(true);
        assert!(matches!(store.list("").await, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_subscription_snapshots() {
        let store = MemoryDocumentStore::new();
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
        let sink = seen.clone();

        let sub = store
            .subscribe(
                Query::collection("guestbook").order_by_created(SortDirection::Descending),
                Box::new(move |docs| {
                    let names = docs
                        .iter()
                        .map(|d| d.data["name"].as_str().unwrap_or_default().to_string())
                        .collect();
                    sink.lock().push(names);
                }),
            )
            .unwrap();

        store.insert("guestbook", json!({"name": "a"})).await.unwrap();
        store.insert("other", json!({"name": "x"})).await.unwrap();
        store.insert("guestbook", json!({"name": "b"})).await.unwrap();

        {
            let seen = seen.lock();
            assert_eq!(seen.len(), 3);
            assert!(seen[0].is_empty());
            assert_eq!(seen[1], vec!["a"]);
            assert_eq!(seen[2], vec!["b", "a"]);
        }

        drop(sub);
        assert_eq!(store.subscriber_count(), 0);
        store.insert("guestbook", json!({"name": "c"})).await.unwrap();
        assert_eq!(seen.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_insert_rejects_non_objects() {
        let store = MemoryDocumentStore::new();
        let result = store.insert("guestbook", json!("hello")).await;
        assert!(matches!(result, Err(StoreError::InvalidDocument(_))));
        assert_eq!(store.count("guestbook"), 0);
    }

    #[tokio::test]
    async fn test_failing_document_store() {
        let store = MemoryDocumentStore::new();
        store.set_failing(true);
        assert!(store.insert("guestbook", json!({})).await.is_err());
        assert!(store
            .subscribe(Query::collection("guestbook"), Box::new(|_| {}))
            .is_err());
    }
}
