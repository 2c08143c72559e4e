use chrono::{DateTime, Utc};
use std::fmt;

/// Identifier of the store's root container.
pub const ROOT_FOLDER_ID: &str = "root";

/// MIME type the store uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Store-assigned identifier of a file or folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_FOLDER_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A folder or file as returned by a store query.
/// Entries only live for the duration of a lookup; nothing here is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEntry {
    pub id: FileId,
    pub name: String,
    pub parents: Vec<FileId>,
    pub mime_type: String,
    pub modified_time: Option<DateTime<Utc>>,
}

impl RemoteEntry {
    #[allow(dead_code)]
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

/// Filter for a single store query.
///
/// `parent` is always required; `name` and `mime_type` are exact,
/// case-sensitive matches when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub name: Option<String>,
    pub parent: FileId,
    pub mime_type: Option<String>,
}

impl EntryQuery {
    /// Folders called `name` directly under `parent`.
    pub fn folder_named(name: &str, parent: &FileId) -> Self {
        Self {
            name: Some(name.to_string()),
            parent: parent.clone(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
        }
    }

    /// Any entry called `name` directly under `parent`, whatever its type.
    pub fn entry_named(name: &str, parent: &FileId) -> Self {
        Self {
            name: Some(name.to_string()),
            parent: parent.clone(),
            mime_type: None,
        }
    }

    /// Every direct child of `parent`.
    pub fn children_of(parent: &FileId) -> Self {
        Self {
            name: None,
            parent: parent.clone(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn matches(&self, entry: &RemoteEntry) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |name| entry.name == name);
        let type_ok = self
            .mime_type
            .as_deref()
            .map_or(true, |mime| entry.mime_type == mime);
        name_ok && type_ok && entry.parents.contains(&self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, parent: &str, mime: &str) -> RemoteEntry {
        RemoteEntry {
            id: FileId::new(format!("id-{}", name)),
            name: name.to_string(),
            parents: vec![FileId::new(parent)],
            mime_type: mime.to_string(),
            modified_time: None,
        }
    }

    #[test]
    fn folder_query_requires_folder_type() {
        let query = EntryQuery::folder_named("dev", &FileId::root());
        assert!(query.matches(&entry("dev", "root", FOLDER_MIME_TYPE)));
        assert!(!query.matches(&entry("dev", "root", "text/plain")));
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let query = EntryQuery::entry_named("Chat", &FileId::root());
        assert!(query.matches(&entry("Chat", "root", SPREADSHEET_MIME_TYPE)));
        assert!(!query.matches(&entry("chat", "root", SPREADSHEET_MIME_TYPE)));
    }

    #[test]
    fn parent_must_match() {
        let query = EntryQuery::children_of(&FileId::new("folder-1"));
        assert!(query.matches(&entry("a", "folder-1", "text/plain")));
        assert!(!query.matches(&entry("a", "folder-2", "text/plain")));
    }

    #[test]
    fn root_id_displays_as_root() {
        assert_eq!(FileId::root().to_string(), "root");
    }
}
