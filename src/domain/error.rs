use thiserror::Error;

/// Every failure the resolve/download flow can surface to the user.
///
/// The `Display` text is what the session shows next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please enter a video URL")]
    EmptyInput,

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Failed to get video URL")]
    ResolutionFailed,

    #[error("Error: {message}")]
    ServerError { message: String },

    #[error("Could not connect to the server. Please check if the server is running.")]
    Unreachable,

    #[error("Download failed: HTTP status {status}")]
    TransferFailed { status: u16 },

    #[error("Download failed. Please try again.")]
    DeliveryFailed { reason: String },

    #[error("{}", .0.as_deref().unwrap_or("An unexpected error occurred"))]
    Unknown(Option<String>),
}

impl AppError {
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(Some(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_message_fallback() {
        assert_eq!(
            AppError::Unknown(None).to_string(),
            "An unexpected error occurred"
        );
        assert_eq!(AppError::unknown("body read failed").to_string(), "body read failed");
    }

    #[test]
    fn test_delivery_reason_is_not_displayed() {
        let err = AppError::DeliveryFailed {
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "Download failed. Please try again.");
    }
}
