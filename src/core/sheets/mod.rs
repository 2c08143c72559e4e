// Sheets module: turning a fetched grid into chat content.

pub mod content_extractor;
pub mod sheet_models;
pub mod sheet_reader;

pub use content_extractor::extract;
pub use sheet_models::{ContentRecord, SpreadsheetGrid};
pub use sheet_reader::{a1_range, SheetReader};
