//! Object storage seam.

use futures::future::BoxFuture;
use invite_core::{ObjectRef, StoreError};

/// Remote object storage (the photo bucket).
///
/// Returns `'static` futures so callers can spawn them however they want.
pub trait ObjectStore: Send + Sync {
    /// List objects directly under `prefix`.
    fn list(&self, prefix: &str) -> BoxFuture<'static, Result<Vec<ObjectRef>, StoreError>>;

    /// Resolve a URL the presentation layer can load.
    fn download_url(&self, object: &ObjectRef) -> BoxFuture<'static, Result<String, StoreError>>;
}
