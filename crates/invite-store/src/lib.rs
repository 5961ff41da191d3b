//! Data sources for the invitation launcher.
//!
//! The photo gallery and the guestbook are backed by remote services. This
//! crate defines them as injected, mockable traits:
//! - `ObjectStore` lists stored objects and resolves download URLs
//! - `DocumentStore` inserts documents and pushes live query snapshots
//!
//! On top of those sit the gallery loader and the guestbook client. The
//! in-memory implementations back tests and the headless host.

pub mod document;
pub mod gallery;
pub mod guestbook;
pub mod memory;
pub mod object;

pub use document::{ChangeHandler, DocumentStore, Query, SortDirection, StoredDocument, Subscription};
pub use gallery::{load_gallery, sequence_number, sort_photos};
pub use guestbook::{Guestbook, GUESTBOOK_COLLECTION};
pub use memory::{MemoryDocumentStore, MemoryObjectStore};
pub use object::ObjectStore;

pub use invite_core::{GuestEntry, GuestEntryDraft, ObjectRef, Photo, StoreError};
