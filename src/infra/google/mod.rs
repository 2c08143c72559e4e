// =============================================================================
// GOOGLE MODULE
// =============================================================================
//
// Adapters from the core ports to Google's REST APIs.
//
// - `auth.rs` turns service account keys (or a pre-acquired token) into
//   bearer tokens.
// - `drive_client.rs` implements `RemoteFileStore` over Drive v3 `files.list`.
// - `sheets_client.rs` implements `SheetReader` over Sheets v4.
// - `api_error.rs` maps failed responses onto `RemoteError`.
//
// All calls are read-only; the requested scopes are `drive.readonly` and
// `spreadsheets.readonly`.

mod api_error;
pub mod auth;
pub mod drive_client;
pub mod sheets_client;

pub use auth::session_from_env;
pub use drive_client::GoogleDriveClient;
pub use sheets_client::GoogleSheetsClient;
