// This is the entry point of the chat feed client.
//
// **Architecture Overview:**
// - `core/` = Chat feed logic and the ports it needs (no HTTP)
// - `infra/` = Implementations of those ports (Google Drive/Sheets, in-memory store)
//
// This file's job is to:
// 1. Load configuration
// 2. Build the authenticated session and API clients (dependency injection)
// 3. Refresh the chat feed once, or on an interval

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::chat::{ChatFeedService, ChatMessage, FeedConfig, MessageOrigin};
use crate::core::drive::drive_models::SPREADSHEET_MIME_TYPE;
use crate::core::drive::PathResolver;
use crate::core::timestamps::TimestampLabel;
use crate::infra::google::{session_from_env, GoogleDriveClient, GoogleSheetsClient};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Feed = ChatFeedService<GoogleDriveClient, GoogleSheetsClient>;

/// Renders one message as a single console line.
fn render_message(message: &ChatMessage) -> String {
    let author = match message.origin {
        MessageOrigin::User => "you",
        MessageOrigin::Remote => "sheet",
    };

    match TimestampLabel::new(message.timestamp.as_deref()) {
        Some(label) => format!("[{}] {}: {}", label.text(), author, message.text),
        None => format!("{}: {}", author, message.text),
    }
}

/// One refresh: resolve, read, print. Errors are reported, never fatal.
async fn refresh_once(feed: &Feed, config: &FeedConfig) {
    tracing::info!(
        "Loading chat '{}' from '{}'",
        config.file_name,
        config.folder_path
    );

    match feed.refresh(&config.folder_path, &config.file_name).await {
        Ok(messages) if messages.is_empty() => {
            println!("No content found in CONTENT column");
        }
        Ok(messages) => {
            for message in &messages {
                println!("{}", render_message(message));
            }
            println!("Loaded {} messages from Google Sheets", messages.len());
        }
        Err(e) if e.requires_consent() => {
            tracing::error!("Additional permissions needed: {}", e);
            println!("Access to Google Drive was denied. Re-authorise and try again.");
        }
        Err(e) if e.is_not_found() => {
            tracing::warn!("{}", e);
            println!(
                "Chat file '{}' not found in /{}/",
                config.file_name,
                config.folder_path.trim_matches('/')
            );
        }
        Err(e) => {
            tracing::error!("Error loading chat data: {}", e);
            println!("Connection problem while loading chat data: {}", e);
        }
    }
}

/// Logs the spreadsheets next to the chat file and when the chat was last
/// modified. Purely diagnostic; failures only produce a warning.
async fn log_chat_folder(feed: &Feed, drive: &GoogleDriveClient, config: &FeedConfig) {
    let resolver = feed.resolver();

    match resolver
        .list_folder(&config.folder_path, Some(SPREADSHEET_MIME_TYPE))
        .await
    {
        Ok(entries) => {
            for entry in &entries {
                tracing::debug!("Spreadsheet in folder: {} ({})", entry.name, entry.id);
            }
        }
        Err(e) => tracing::warn!("Could not list chat folder: {}", e),
    }

    if let Ok(id) = resolver
        .resolve(&config.folder_path, &config.file_name)
        .await
    {
        match drive.get_entry(&id).await {
            Ok(entry) => tracing::info!(
                "Chat file {} last modified {:?}",
                entry.id,
                entry.modified_time
            ),
            Err(e) => tracing::warn!("Could not read chat file metadata: {}", e),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ========================================================================
    // CONFIGURATION & SERVICES
    // ========================================================================

    let config = FeedConfig::from_env();
    tracing::debug!("Feed config: {:?}", config);

    let session = session_from_env()
        .await
        .context("Failed to set up Google authentication")?;

    let feed = ChatFeedService::new(
        PathResolver::new(GoogleDriveClient::new(Arc::clone(&session))),
        GoogleSheetsClient::new(Arc::clone(&session)),
    )
    .with_columns(config.columns.clone());

    if tracing::enabled!(tracing::Level::DEBUG) {
        let drive = GoogleDriveClient::new(Arc::clone(&session));
        log_chat_folder(&feed, &drive, &config).await;
    }

    // ========================================================================
    // REFRESH LOOP
    // ========================================================================

    match config.refresh_interval {
        None => refresh_once(&feed, &config).await,
        Some(interval) => loop {
            refresh_once(&feed, &config).await;
            tracing::debug!("Next refresh in {:?}", interval);
            tokio::time::sleep(interval).await;
        },
    }

    Ok(())
}
