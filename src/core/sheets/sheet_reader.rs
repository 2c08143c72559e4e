use super::sheet_models::SpreadsheetGrid;
use crate::core::drive::FileId;
use crate::core::remote::RemoteError;
use async_trait::async_trait;

/// Read access to spreadsheet content.
#[async_trait]
pub trait SheetReader: Send + Sync {
    /// Titles of the spreadsheet's sheets (tabs), in display order.
    async fn sheet_titles(&self, spreadsheet_id: &FileId) -> Result<Vec<String>, RemoteError>;

    /// Cell text for an A1-notation range such as `'Sheet1'!A:Z`.
    async fn read_grid(
        &self,
        spreadsheet_id: &FileId,
        range: &str,
    ) -> Result<SpreadsheetGrid, RemoteError>;
}

/// Builds an A1 range on `sheet_title`, quoting the title so names with
/// spaces or apostrophes stay valid.
pub fn a1_range(sheet_title: &str, columns: &str) -> String {
    format!("'{}'!{}", sheet_title.replace('\'', "''"), columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_sheet_titles() {
        assert_eq!(a1_range("Sheet1", "A:Z"), "'Sheet1'!A:Z");
        assert_eq!(a1_range("Bob's chat", "A:C"), "'Bob''s chat'!A:C");
    }
}
