use thiserror::Error;

/// Failure reported by a remote collaborator (file store, spreadsheet reader).
///
/// "Nothing matched" is never an error at this level: queries return an empty
/// list. These variants only describe why the remote side could not answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Network, service or decoding failure. The user may retry.
    #[error("Remote service error: {0}")]
    Transport(String),

    /// The session lacks a valid token or the consent for the requested scope.
    #[error("Authorization required: {0}")]
    AuthRequired(String),
}

impl RemoteError {
    pub fn requires_consent(&self) -> bool {
        matches!(self, RemoteError::AuthRequired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_failures_require_consent() {
        assert!(RemoteError::AuthRequired("scope".into()).requires_consent());
        assert!(!RemoteError::Transport("timeout".into()).requires_consent());
    }

    #[test]
    fn error_messages_carry_detail() {
        let err = RemoteError::Transport("connection reset".into());
        assert_eq!(err.to_string(), "Remote service error: connection reset");
    }
}
