/// Failures that abort a copy sequence or a settings round-trip
use crate::host::HostError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Failed to read options: {0}")]
    Store(HostError),

    #[error("Failed to save options: {0}")]
    StoreWrite(HostError),

    #[error("Failed to write to clipboard: {0}")]
    Clipboard(HostError),

    #[error("Failed to inject extractor: {0}")]
    Injection(HostError),

    #[error("Failed to send message: {0}")]
    Messaging(HostError),

    #[error("Failed to read platform info: {0}")]
    Platform(HostError),

    #[error("Failed to read page: {0}")]
    Page(String),

    #[error("Expected {expected} reply, got {got}")]
    UnexpectedReply { expected: &'static str, got: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = PipelineError::Clipboard(HostError::new("Document is not focused."));
        assert_eq!(
            error.to_string(),
            "Failed to write to clipboard: Document is not focused."
        );

        let error = PipelineError::UnexpectedReply {
            expected: "platformReply",
            got: "none".to_string(),
        };
        assert_eq!(error.to_string(), "Expected platformReply reply, got none");
    }
}
