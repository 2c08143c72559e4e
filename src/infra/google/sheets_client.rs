use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::api_error::{ensure_success, transport};
use super::auth::AuthSession;
use crate::core::drive::FileId;
use crate::core::remote::RemoteError;
use crate::core::sheets::{SheetReader, SpreadsheetGrid};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Read-only Sheets v4 client.
pub struct GoogleSheetsClient {
    client: Client,
    session: Arc<dyn AuthSession>,
    base_url: String,
}

impl GoogleSheetsClient {
    pub fn new(session: Arc<dyn AuthSession>) -> Self {
        Self {
            client: Client::new(),
            session,
            base_url: SHEETS_API_URL.to_string(),
        }
    }

    /// `{base}/{id}/{extra...}` with every segment percent-encoded.
    fn spreadsheet_url(&self, spreadsheet_id: &FileId, extra: &[&str]) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RemoteError::Transport(format!("Invalid Sheets URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport("Sheets URL cannot take a path".to_string()))?
            .push(spreadsheet_id.as_str())
            .extend(extra);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        what: &str,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteError> {
        let token = self.session.access_token().await?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", token))
            .query(query)
            .send()
            .await
            .map_err(|e| transport(what, e))?;

        ensure_success(what, response)
            .await?
            .json()
            .await
            .map_err(|e| transport(what, e))
    }
}

#[async_trait]
impl SheetReader for GoogleSheetsClient {
    async fn sheet_titles(&self, spreadsheet_id: &FileId) -> Result<Vec<String>, RemoteError> {
        let url = self.spreadsheet_url(spreadsheet_id, &[])?;
        let meta: SpreadsheetMeta = self
            .get_json(
                "Sheets spreadsheets.get",
                url,
                &[("fields", "sheets.properties.title")],
            )
            .await?;

        Ok(meta.titles())
    }

    async fn read_grid(
        &self,
        spreadsheet_id: &FileId,
        range: &str,
    ) -> Result<SpreadsheetGrid, RemoteError> {
        let url = self.spreadsheet_url(spreadsheet_id, &["values", range])?;
        let values: ValueRange = self
            .get_json(
                "Sheets values.get",
                url,
                &[("majorDimension", "ROWS")],
            )
            .await?;

        let grid = values.into_grid();
        tracing::debug!("Read {} rows from {}", grid.len(), range);
        Ok(grid)
    }
}

/// Text of one cell. Formatted values arrive as strings; anything else is
/// rendered as JSON text and nulls become empty cells.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// =============================================================================
// SHEETS API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<ApiSheet>,
}

impl SpreadsheetMeta {
    fn titles(self) -> Vec<String> {
        self.sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ApiSheet {
    properties: Option<SheetProperties>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: Option<String>,
}

/// `values` is omitted entirely when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_grid(self) -> SpreadsheetGrid {
        SpreadsheetGrid::new(
            self.values
                .into_iter()
                .map(|row| row.into_iter().map(cell_text).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::google::auth::StaticTokenSession;

    fn client() -> GoogleSheetsClient {
        GoogleSheetsClient::new(Arc::new(StaticTokenSession::new("token")))
    }

    #[test]
    fn values_url_encodes_range() {
        let url = client()
            .spreadsheet_url(&FileId::new("sheet42"), &["values", "'My Chat'!A:Z"])
            .unwrap();

        let text = url.as_str();
        assert!(text.starts_with("https://sheets.googleapis.com/v4/spreadsheets/sheet42/values/"));
        assert!(text.contains("My%20Chat"));
        assert!(text.ends_with("!A:Z"));
    }

    #[test]
    fn decodes_ragged_values() {
        let body = r#"{
            "range": "Sheet1!A1:Z4",
            "majorDimension": "ROWS",
            "values": [
                ["TIMESTAMP", "CONTENT", "SCORE"],
                ["13/09/2025 10:20:10", "hello", 3],
                ["", "world"],
                []
            ]
        }"#;

        let grid = serde_json::from_str::<ValueRange>(body).unwrap().into_grid();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.rows()[1], vec!["13/09/2025 10:20:10", "hello", "3"]);
        assert_eq!(grid.rows()[2].len(), 2);
        assert!(grid.rows()[3].is_empty());
    }

    #[test]
    fn empty_range_decodes_to_empty_grid() {
        let body = r#"{"range": "Sheet1!A1:Z1000", "majorDimension": "ROWS"}"#;
        let grid = serde_json::from_str::<ValueRange>(body).unwrap().into_grid();
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn non_string_cells_become_text() {
        assert_eq!(cell_text(Value::Null), "");
        assert_eq!(cell_text(Value::Bool(true)), "true");
        assert_eq!(cell_text(serde_json::json!(1.5)), "1.5");
    }

    #[test]
    fn titles_come_back_in_order() {
        let body = r#"{"sheets": [
            {"properties": {"title": "Messages"}},
            {"properties": {}},
            {"properties": {"title": "Archive"}}
        ]}"#;
        let meta: SpreadsheetMeta = serde_json::from_str(body).unwrap();
        assert_eq!(meta.titles(), vec!["Messages", "Archive"]);
    }
}
