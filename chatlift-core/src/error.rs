//! Structured error types for chatlift-core.
//!
//! Uses `thiserror` for composable library errors. The binary crate
//! (chatlift-cli) wraps these in `anyhow` with an exit-code policy.

use thiserror::Error;

/// Main error type for chatlift-core operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// Extraction completed but the page held no messages
    #[error("No messages found in the conversation.")]
    NoMessages,

    /// A structural assumption about the page markup was violated
    #[error("missing content node in {platform} message turn")]
    MissingContent { platform: &'static str },
}

/// Result type alias for chatlift-core operations
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// The message placed in the failure response.
    ///
    /// `NoMessages` keeps its literal wording; every other fault is wrapped
    /// so nothing crosses the orchestration boundary raw.
    pub fn response_message(&self) -> String {
        match self {
            ExportError::NoMessages => self.to_string(),
            other => format!("Extraction failed: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_messages_keeps_its_literal_wording() {
        let err = ExportError::NoMessages;
        assert_eq!(err.to_string(), "No messages found in the conversation.");
        assert_eq!(
            err.response_message(),
            "No messages found in the conversation."
        );
    }

    #[test]
    fn faults_are_wrapped_for_the_caller() {
        let err = ExportError::MissingContent { platform: "Claude" };
        assert_eq!(
            err.response_message(),
            "Extraction failed: missing content node in Claude message turn"
        );
    }
}
