//! Error types module
//!
//! Operational failures of the control and its tooling. File validation outcomes
//! (type, extension, size) are not errors: they are recorded on the selected entry as a
//! FAIL status with a feedback message.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed caller input
    Debug,
    /// Warning level - for recoverable issues
    Warn,
}

#[derive(Debug, thiserror::Error)]
pub enum FilepickError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid response record: {0}")]
    InvalidResponse(String),

    #[error("File not found in selection: {0}")]
    FileNotFound(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for FilepickError {
    fn from(err: validator::ValidationErrors) -> Self {
        FilepickError::InvalidResponse(format!("Validation error: {}", err))
    }
}

impl FilepickError {
    /// Machine-readable error code (e.g., "INVALID_CONFIG")
    pub fn error_code(&self) -> &'static str {
        match self {
            FilepickError::InvalidConfig(_) => "INVALID_CONFIG",
            FilepickError::InvalidResponse(_) => "INVALID_RESPONSE",
            FilepickError::FileNotFound(_) => "FILE_NOT_FOUND",
            FilepickError::Json(_) => "JSON_ERROR",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            FilepickError::InvalidResponse(_)
            | FilepickError::FileNotFound(_)
            | FilepickError::Json(_) => LogLevel::Debug,
            FilepickError::InvalidConfig(_) => LogLevel::Warn,
        }
    }

    /// Emit this error through `tracing` at its own level.
    pub fn log(&self) {
        match self.log_level() {
            LogLevel::Debug => tracing::debug!(code = self.error_code(), error = %self),
            LogLevel::Warn => tracing::warn!(code = self.error_code(), error = %self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_invalid_config() {
        let err = FilepickError::InvalidConfig("FILEPICK_MULTIPLE".to_string());
        assert_eq!(err.error_code(), "INVALID_CONFIG");
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert_eq!(err.to_string(), "Invalid configuration: FILEPICK_MULTIPLE");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err = FilepickError::from(parse.unwrap_err());
        assert_eq!(err.error_code(), "JSON_ERROR");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
