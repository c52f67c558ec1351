//! Error types shared across CapView crates.

/// Top-level error type for CapView operations.
#[derive(Debug, thiserror::Error)]
pub enum CapviewError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Selection error: {message}")]
    Selection { message: String },

    #[error("Profile error: {message}")]
    Profile { message: String },

    #[error("Profile import error: {message}")]
    ProfileImport { message: String },

    #[error("Preview error: {message}")]
    Preview { message: String },

    #[error("Capture backend error for monitor {monitor_id}: {message}")]
    Capture { monitor_id: String, message: String },

    #[error("Monitor not found: {monitor_id}")]
    MonitorNotFound { monitor_id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CapviewError.
pub type CapviewResult<T> = Result<T, CapviewError>;

impl CapviewError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection {
            message: msg.into(),
        }
    }

    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile {
            message: msg.into(),
        }
    }

    pub fn profile_import(msg: impl Into<String>) -> Self {
        Self::ProfileImport {
            message: msg.into(),
        }
    }

    pub fn preview(msg: impl Into<String>) -> Self {
        Self::Preview {
            message: msg.into(),
        }
    }

    pub fn capture(monitor_id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Capture {
            monitor_id: monitor_id.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
