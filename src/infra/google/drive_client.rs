use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use super::api_error::{ensure_success, transport};
use super::auth::AuthSession;
use crate::core::drive::{EntryQuery, FileId, RemoteEntry, RemoteFileStore};
use crate::core::remote::RemoteError;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Fields requested for every file resource.
const FILE_FIELDS: &str = "id, name, mimeType, parents, modifiedTime";

/// One page is all we read; chat folders are small.
const PAGE_SIZE: &str = "100";

/// Read-only Drive v3 client. It exposes only the lookups the core needs.
pub struct GoogleDriveClient {
    client: Client,
    session: Arc<dyn AuthSession>,
    base_url: String,
}

impl GoogleDriveClient {
    pub fn new(session: Arc<dyn AuthSession>) -> Self {
        Self {
            client: Client::new(),
            session,
            base_url: DRIVE_FILES_URL.to_string(),
        }
    }

    /// Renders a query in Drive's search syntax. Trashed files never match.
    pub fn build_query(query: &EntryQuery) -> String {
        let mut clauses = Vec::new();

        if let Some(name) = &query.name {
            clauses.push(format!("name = '{}'", escape_literal(name)));
        }
        clauses.push(format!(
            "'{}' in parents",
            escape_literal(query.parent.as_str())
        ));
        if let Some(mime_type) = &query.mime_type {
            clauses.push(format!("mimeType = '{}'", escape_literal(mime_type)));
        }
        clauses.push("trashed = false".to_string());

        clauses.join(" and ")
    }

    fn parse_datetime(value: Option<String>) -> Option<DateTime<Utc>> {
        value
            .as_deref()
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn map_file(api: ApiFile) -> RemoteEntry {
        RemoteEntry {
            id: FileId::new(api.id),
            name: api.name,
            parents: api.parents.into_iter().map(FileId::new).collect(),
            mime_type: api.mime_type,
            modified_time: Self::parse_datetime(api.modified_time),
        }
    }

    async fn bearer(&self) -> Result<String, RemoteError> {
        Ok(format!("Bearer {}", self.session.access_token().await?))
    }

    /// Fetches metadata for a single file by id.
    pub async fn get_entry(&self, id: &FileId) -> Result<RemoteEntry, RemoteError> {
        const WHAT: &str = "Drive files.get";

        let url = format!("{}/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer().await?)
            .query(&[("fields", FILE_FIELDS)])
            .send()
            .await
            .map_err(|e| transport(WHAT, e))?;

        let file: ApiFile = ensure_success(WHAT, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(WHAT, e))?;
        Ok(Self::map_file(file))
    }
}

#[async_trait]
impl RemoteFileStore for GoogleDriveClient {
    async fn query(&self, query: &EntryQuery) -> Result<Vec<RemoteEntry>, RemoteError> {
        const WHAT: &str = "Drive files.list";

        let q = Self::build_query(query);
        let fields = format!("files({})", FILE_FIELDS);
        tracing::debug!("Drive query: {}", q);

        let response = self
            .client
            .get(&self.base_url)
            .header("Authorization", self.bearer().await?)
            .query(&[
                ("q", q.as_str()),
                ("fields", fields.as_str()),
                ("pageSize", PAGE_SIZE),
                ("spaces", "drive"),
            ])
            .send()
            .await
            .map_err(|e| transport(WHAT, e))?;

        let list: ApiFileList = ensure_success(WHAT, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(WHAT, e))?;

        tracing::debug!("Drive returned {} entries", list.files.len());
        Ok(list.files.into_iter().map(Self::map_file).collect())
    }
}

/// Escapes a value for a single-quoted Drive query literal.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

// =============================================================================
// DRIVE API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct ApiFileList {
    #[serde(default)]
    files: Vec<ApiFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    parents: Vec<String>,
    modified_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drive::FOLDER_MIME_TYPE;

    #[test]
    fn folder_query_syntax() {
        let query = EntryQuery::folder_named("CHATDROID", &FileId::new("abc123"));
        assert_eq!(
            GoogleDriveClient::build_query(&query),
            "name = 'CHATDROID' and 'abc123' in parents and \
             mimeType = 'application/vnd.google-apps.folder' and trashed = false"
        );
    }

    #[test]
    fn file_query_has_no_type_clause() {
        let query = EntryQuery::entry_named("Chat", &FileId::root());
        assert_eq!(
            GoogleDriveClient::build_query(&query),
            "name = 'Chat' and 'root' in parents and trashed = false"
        );
    }

    #[test]
    fn children_query_lists_parent_only() {
        let query = EntryQuery::children_of(&FileId::root()).with_mime_type(FOLDER_MIME_TYPE);
        let q = GoogleDriveClient::build_query(&query);
        assert!(q.starts_with("'root' in parents"));
        assert!(!q.contains("name ="));
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let query = EntryQuery::entry_named(r"Bob's \chat", &FileId::root());
        let q = GoogleDriveClient::build_query(&query);
        assert!(q.starts_with(r"name = 'Bob\'s \\chat'"));
    }

    #[test]
    fn decodes_file_list() {
        let body = r#"{
            "files": [
                {"id": "1a", "name": "Chat", "mimeType": "application/vnd.google-apps.spreadsheet",
                 "parents": ["folder9"], "modifiedTime": "2025-09-13T10:20:10.000Z"},
                {"id": "2b", "name": "dev", "mimeType": "application/vnd.google-apps.folder"}
            ]
        }"#;

        let list: ApiFileList = serde_json::from_str(body).unwrap();
        let entries: Vec<RemoteEntry> = list
            .files
            .into_iter()
            .map(GoogleDriveClient::map_file)
            .collect();

        assert_eq!(entries[0].id, FileId::new("1a"));
        assert_eq!(entries[0].parents, vec![FileId::new("folder9")]);
        assert_eq!(
            entries[0].modified_time.map(|t| t.to_rfc3339()),
            Some("2025-09-13T10:20:10+00:00".to_string())
        );
        assert!(entries[1].is_folder());
        assert!(entries[1].parents.is_empty());
        assert_eq!(entries[1].modified_time, None);
    }

    #[test]
    fn empty_list_response_has_no_files() {
        let list: ApiFileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
    }
}
