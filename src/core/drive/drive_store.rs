use super::drive_models::{EntryQuery, RemoteEntry};
use crate::core::remote::RemoteError;
use async_trait::async_trait;

/// Read-only query capability over a hierarchical file store.
///
/// Implementations must return matches in the store's natural order and an
/// empty list (never an error) when nothing matches.
#[async_trait]
pub trait RemoteFileStore: Send + Sync {
    async fn query(&self, query: &EntryQuery) -> Result<Vec<RemoteEntry>, RemoteError>;
}
