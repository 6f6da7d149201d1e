/// Custom error type for build_notify operations
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Webhook delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Helper type for Results that use NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
