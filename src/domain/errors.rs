/// Flat error type shared by every layer. Nothing here is fatal: callers log
/// and keep the rest of the dashboard state intact.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Request could not be sent, timed out, or came back non-2xx.
    Network(String),
    /// Body decoded but does not have the expected shape, or the API
    /// answered with its own error/notice message.
    InvalidResponse(String),
    /// JSON or numeric decoding failed.
    Parse(String),
    Validation(String),
    Configuration(String),
}

impl AppError {
    /// Short tag used as log metadata.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(_) => "network",
            AppError::InvalidResponse(_) => "invalid-response",
            AppError::Parse(_) => "parse",
            AppError::Validation(_) => "validation",
            AppError::Configuration(_) => "configuration",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::InvalidResponse(msg) => write!(f, "Invalid Response: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(e: url::ParseError) -> Self {
        AppError::Configuration(format!("bad API url: {}", e))
    }
}

pub type NetworkResult<T> = Result<T, AppError>;
