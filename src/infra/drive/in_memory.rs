// IN-MEMORY implementation of RemoteFileStore.
//
// Used for local development and tests. Children are kept per parent in
// insertion order, which stands in for the remote store's natural order.

use crate::core::drive::{EntryQuery, FileId, RemoteEntry, RemoteFileStore, FOLDER_MIME_TYPE};
use crate::core::remote::RemoteError;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A folder tree held in a `DashMap` keyed by parent id.
/// Safe to share across tasks.
#[allow(dead_code)]
pub struct InMemoryFileStore {
    /// parent id -> children, in insertion order
    children: DashMap<FileId, Vec<RemoteEntry>>,
    next_id: AtomicU64,
}

#[allow(dead_code)]
impl InMemoryFileStore {
    pub fn new() -> Self {
        Self {
            children: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn allocate_id(&self) -> FileId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        FileId::new(format!("mem-{}", n))
    }

    /// Adds an entry under each of its parents.
    pub fn insert(&self, entry: RemoteEntry) {
        for parent in &entry.parents {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(entry.clone());
        }
    }

    pub fn add_folder(&self, parent: &FileId, name: &str) -> FileId {
        self.add_file(parent, name, FOLDER_MIME_TYPE)
    }

    pub fn add_file(&self, parent: &FileId, name: &str, mime_type: &str) -> FileId {
        let id = self.allocate_id();
        self.insert(RemoteEntry {
            id: id.clone(),
            name: name.to_string(),
            parents: vec![parent.clone()],
            mime_type: mime_type.to_string(),
            modified_time: Some(Utc::now()),
        });
        id
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteFileStore for InMemoryFileStore {
    async fn query(&self, query: &EntryQuery) -> Result<Vec<RemoteEntry>, RemoteError> {
        Ok(self
            .children
            .get(&query.parent)
            .map(|children| {
                children
                    .iter()
                    .filter(|entry| query.matches(entry))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
