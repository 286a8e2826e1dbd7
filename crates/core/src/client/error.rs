use std::fmt;

pub const DEFAULT_SERVICE_ERROR: &str = "An error occurred during prediction";

/// Error reported by the prediction service itself (`success: false`).
/// Transport failures stay plain `anyhow` errors; callers recover this
/// one by downcast to show the service's own message.
#[derive(Debug, Clone)]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_response_error(error: Option<String>) -> Self {
        let message = error
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_ERROR.to_string());
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ServiceError {}
