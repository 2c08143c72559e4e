// Resolves logical paths like "dev/CHATDROID" + "Chat" into store identifiers.
//
// The walk is strictly sequential: every folder lookup needs the id found by
// the previous one, so the queries are awaited one after another.

use super::drive_models::{EntryQuery, FileId, RemoteEntry};
use super::drive_store::RemoteFileStore;
use crate::core::remote::RemoteError;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Folder '{folder}' not found in '{parent}'")]
    FolderNotFound { folder: String, parent: FileId },

    #[error("File '{name}' not found in '{parent}'")]
    FileNotFound { name: String, parent: FileId },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ResolveError {
    /// True for a missing folder or file, false for transport/auth failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::FolderNotFound { .. } | ResolveError::FileNotFound { .. }
        )
    }

    /// True when the caller should route the user to a re-consent flow.
    pub fn requires_consent(&self) -> bool {
        matches!(self, ResolveError::Remote(err) if err.requires_consent())
    }
}

/// Splits a logical path into folder names, dropping empty segments.
/// `""`, `"/"` and `"//"` all yield no segments (the root container).
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Walks folder paths against a [`RemoteFileStore`].
///
/// Holds no mutable state and never caches: every call re-walks the whole path,
/// so concurrent callers can share one resolver freely.
pub struct PathResolver<S: RemoteFileStore> {
    store: S,
}

impl<S: RemoteFileStore> PathResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the id of the entry named `file_name` inside the folder `path`.
    ///
    /// At every level the first match in store order wins; there is no
    /// backtracking into same-named sibling folders.
    ///
    /// The terminal lookup has no type filter, so a folder named `file_name`
    /// can be returned instead of a file if the store lists it first.
    pub async fn resolve(&self, path: &str, file_name: &str) -> Result<FileId, ResolveError> {
        tracing::debug!("Resolving '{}' in path '{}'", file_name, path);

        let parent = self.resolve_folder(path).await?;

        let matches = self
            .store
            .query(&EntryQuery::entry_named(file_name, &parent))
            .await?;
        tracing::debug!(
            "Found {} entries named '{}' in '{}'",
            matches.len(),
            file_name,
            parent
        );

        match matches.into_iter().next() {
            Some(entry) => {
                tracing::info!("Resolved '{}/{}' to {}", path, file_name, entry.id);
                Ok(entry.id)
            }
            None => {
                tracing::warn!("File '{}' not found in folder {}", file_name, parent);
                Err(ResolveError::FileNotFound {
                    name: file_name.to_string(),
                    parent,
                })
            }
        }
    }

    /// Returns the id of the folder at `path`, or the root id for an empty path.
    pub async fn resolve_folder(&self, path: &str) -> Result<FileId, ResolveError> {
        let mut current = FileId::root();

        for folder in path_segments(path) {
            tracing::debug!("Looking up folder '{}' in '{}'", folder, current);

            let found = self
                .store
                .query(&EntryQuery::folder_named(folder, &current))
                .await?;

            match found.into_iter().next() {
                Some(entry) => current = entry.id,
                None => {
                    tracing::warn!("Folder '{}' not found in '{}'", folder, current);
                    return Err(ResolveError::FolderNotFound {
                        folder: folder.to_string(),
                        parent: current,
                    });
                }
            }
        }

        Ok(current)
    }

    /// Lists the direct children of the folder at `path`, optionally only
    /// those with the given MIME type.
    pub async fn list_folder(
        &self,
        path: &str,
        mime_type: Option<&str>,
    ) -> Result<Vec<RemoteEntry>, ResolveError> {
        let folder = self.resolve_folder(path).await?;

        let mut query = EntryQuery::children_of(&folder);
        if let Some(mime) = mime_type {
            query = query.with_mime_type(mime);
        }

        let entries = self.store.query(&query).await?;
        tracing::debug!("Folder '{}' holds {} matching entries", path, entries.len());
        Ok(entries)
    }
}

// ============================================================================
// TESTS
// ============================================================================
