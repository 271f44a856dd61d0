use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset service error: {message}")]
    ServiceError {
        message: String,
        traceback: Option<String>,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Service,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BuilderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuilderError::ApiError(_) => ErrorCategory::Network,
            BuilderError::ConfigError { .. }
            | BuilderError::MissingConfigError { .. }
            | BuilderError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BuilderError::ServiceError { .. } => ErrorCategory::Service,
            BuilderError::ValidationError { .. } | BuilderError::SerializationError(_) => {
                ErrorCategory::Validation
            }
            BuilderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BuilderError::ApiError(e) if e.is_connect() => {
                "Could not reach the dataset service".to_string()
            }
            BuilderError::ApiError(_) => "The dataset service request failed".to_string(),
            BuilderError::ServiceError { message, .. } => message.clone(),
            BuilderError::ValidationError { message } => message.clone(),
            BuilderError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            BuilderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the dataset service is running and the base URL is correct",
            ErrorCategory::Configuration => "Review the build file or command line flags",
            ErrorCategory::Service => "Inspect the service traceback and adjust the column configuration",
            ErrorCategory::Validation => "Fix the column definition and submit again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, BuilderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = BuilderError::ValidationError {
            message: "Name is required!".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Name is required!");

        let err = BuilderError::MissingConfigError {
            field: "service.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("service.base_url"));
    }
}
