use thiserror::Error;

/// Generic message shown for transport and server failures
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }

    /// Client-side validation failures are reported verbatim, everything
    /// else is collapsed into a generic toast after being logged.
    pub fn toast_message(&self) -> String {
        match self {
            DashboardError::Validation(msg) => msg.clone(),
            DashboardError::Rejected(msg) if !msg.is_empty() => msg.clone(),
            DashboardError::Network(e) => {
                tracing::error!("Network error: {:?}", e);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            DashboardError::Server { status, message } => {
                tracing::error!("Server error {}: {}", status, message);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            DashboardError::Anyhow(e) => {
                tracing::error!("Anyhow error: {:?}", e);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => {
                tracing::error!("Dashboard error: {}", other);
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::Validation(_))
    }
}
