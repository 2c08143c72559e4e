pub mod chat_models;
pub mod chat_service;
pub mod feed_config;

pub use chat_models::{ChatMessage, MessageOrigin};
#[allow(unused_imports)]
pub use chat_service::{ChatFeedError, ChatFeedService};
pub use feed_config::FeedConfig;
