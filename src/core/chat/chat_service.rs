// The chat feed service: one refresh = resolve the chat sheet, read its first
// tab, and turn the rows into messages. Nothing is cached between refreshes.

use super::chat_models::ChatMessage;
use super::feed_config::DEFAULT_SHEET_COLUMNS;
use crate::core::drive::{FileId, PathResolver, RemoteFileStore, ResolveError};
use crate::core::remote::RemoteError;
use crate::core::sheets::{a1_range, extract, ContentRecord, SheetReader};
use thiserror::Error;

/// Sheet title used when the spreadsheet does not report any tabs.
const FALLBACK_SHEET_TITLE: &str = "Sheet1";

#[derive(Debug, Error)]
pub enum ChatFeedError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to read chat sheet: {0}")]
    Sheet(#[from] RemoteError),
}

impl ChatFeedError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatFeedError::Resolve(err) if err.is_not_found())
    }

    pub fn requires_consent(&self) -> bool {
        match self {
            ChatFeedError::Resolve(err) => err.requires_consent(),
            ChatFeedError::Sheet(err) => err.requires_consent(),
        }
    }
}

pub struct ChatFeedService<S: RemoteFileStore, R: SheetReader> {
    resolver: PathResolver<S>,
    sheets: R,
    /// Column span read from the sheet, e.g. "A:Z".
    columns: String,
}

impl<S: RemoteFileStore, R: SheetReader> ChatFeedService<S, R> {
    pub fn new(resolver: PathResolver<S>, sheets: R) -> Self {
        Self {
            resolver,
            sheets,
            columns: DEFAULT_SHEET_COLUMNS.to_string(),
        }
    }

    pub fn with_columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn resolver(&self) -> &PathResolver<S> {
        &self.resolver
    }

    /// Loads the chat held in the spreadsheet `file_name` under `folder_path`.
    pub async fn refresh(
        &self,
        folder_path: &str,
        file_name: &str,
    ) -> Result<Vec<ChatMessage>, ChatFeedError> {
        let file_id = self.resolver.resolve(folder_path, file_name).await?;
        let records = self.load_records(&file_id).await?;

        tracing::info!(
            "Loaded {} messages from '{}/{}'",
            records.len(),
            folder_path,
            file_name
        );
        Ok(records.into_iter().map(ChatMessage::from).collect())
    }

    /// Reads the first tab of the spreadsheet and extracts its records.
    pub async fn load_records(&self, file_id: &FileId) -> Result<Vec<ContentRecord>, RemoteError> {
        let titles = self.sheets.sheet_titles(file_id).await?;
        let title = titles
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_SHEET_TITLE);

        let range = a1_range(title, &self.columns);
        tracing::debug!("Reading range {} from {}", range, file_id);

        let grid = self.sheets.read_grid(file_id, &range).await?;
        Ok(extract(&grid))
    }
}
