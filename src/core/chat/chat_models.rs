use crate::core::sheets::ContentRecord;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Typed locally by the user.
    User,
    /// Loaded from the chat spreadsheet.
    Remote,
}

/// A message as the display layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub origin: MessageOrigin,
    pub timestamp: Option<String>,
}

impl ChatMessage {
    /// A locally typed message. Returns `None` for blank input.
    #[allow(dead_code)]
    pub fn from_user(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            origin: MessageOrigin::User,
            timestamp: None,
        })
    }

    #[allow(dead_code)]
    pub fn is_from_user(&self) -> bool {
        self.origin == MessageOrigin::User
    }
}

impl From<ContentRecord> for ChatMessage {
    fn from(record: ContentRecord) -> Self {
        Self {
            text: record.content,
            origin: MessageOrigin::Remote,
            timestamp: record.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_trimmed() {
        let message = ChatMessage::from_user("  hello there \n").unwrap();
        assert_eq!(message.text, "hello there");
        assert!(message.is_from_user());
        assert_eq!(message.timestamp, None);
    }

    #[test]
    fn blank_user_input_is_rejected() {
        assert!(ChatMessage::from_user("   ").is_none());
    }

    #[test]
    fn records_become_remote_messages() {
        let message = ChatMessage::from(ContentRecord {
            content: "hi".to_string(),
            timestamp: Some("10:00:01".to_string()),
        });
        assert_eq!(message.origin, MessageOrigin::Remote);
        assert!(!message.is_from_user());
        assert_eq!(message.timestamp.as_deref(), Some("10:00:01"));
    }
}
