//! Guestbook client.
//!
//! Keeps a live, newest-first view of the guestbook collection and submits
//! new messages. Entries are broadcast through a `watch` channel so any
//! number of views can follow them.

use std::sync::Arc;

use futures::future::BoxFuture;
use invite_core::{GuestEntry, GuestEntryDraft, StoreError};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;

use crate::document::{DocumentStore, Query, SortDirection, StoredDocument, Subscription};

/// Collection holding guestbook messages.
pub const GUESTBOOK_COLLECTION: &str = "guestbook";

#[derive(Deserialize)]
struct EntryBody {
    name: String,
    content: String,
}

/// Live guestbook backed by a document store.
pub struct Guestbook {
    store: Arc<dyn DocumentStore>,
    entries: watch::Receiver<Vec<GuestEntry>>,
    _subscription: Subscription,
}

impl Guestbook {
    /// Subscribe to the guestbook. The first snapshot is available at once.
    pub fn open(store: Arc<dyn DocumentStore>) -> Result<Self, StoreError> {
        let (tx, rx) = watch::channel(Vec::new());
        let query = Query::collection(GUESTBOOK_COLLECTION).order_by_created(SortDirection::Descending);

        let subscription = store.subscribe(
            query,
            Box::new(move |docs| {
                let entries: Vec<GuestEntry> = docs
                    .into_iter()
                    .filter_map(|doc| match entry_from_document(doc) {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            tracing::warn!("Skipping guestbook document: {}", e);
                            None
                        }
                    })
                    .collect();
                tx.send_replace(entries);
            }),
        )?;

        Ok(Self {
            store,
            entries: rx,
            _subscription: subscription,
        })
    }

    /// Current entries, newest first.
    pub fn entries(&self) -> Vec<GuestEntry> {
        self.entries.borrow().clone()
    }

    /// A receiver that is notified on every change.
    pub fn watch(&self) -> watch::Receiver<Vec<GuestEntry>> {
        self.entries.clone()
    }

    /// Submit a message. Blank names or messages are rejected before any
    /// request is made.
    pub fn submit(&self, draft: &GuestEntryDraft) -> BoxFuture<'static, Result<String, StoreError>> {
        let Some(draft) = draft.validate() else {
            return Box::pin(async {
                Err(StoreError::InvalidDocument(
                    "name and message are required".to_string(),
                ))
            });
        };

        tracing::info!("Submitting guestbook entry from {}", draft.name);
        self.store.insert(
            GUESTBOOK_COLLECTION,
            json!({ "name": draft.name, "content": draft.content }),
        )
    }
}

fn entry_from_document(doc: StoredDocument) -> Result<GuestEntry, StoreError> {
    let body: EntryBody = serde_json::from_value(doc.data)
        .map_err(|e| StoreError::InvalidDocument(format!("{}: {}", doc.id, e)))?;
    Ok(GuestEntry {
        id: doc.id,
        name: body.name,
        content: body.content,
        created_at: doc.created_at,
    })
}
