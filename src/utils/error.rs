use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchitectError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("AI provider returned {status}: {body}")]
    ProviderError { status: u16, body: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Provider,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ArchitectError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ArchitectError::ApiError(_) => ErrorCategory::Network,
            ArchitectError::ConfigError { .. }
            | ArchitectError::ConfigValidationError { .. }
            | ArchitectError::InvalidConfigValueError { .. }
            | ArchitectError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ArchitectError::AuthenticationError { .. } => ErrorCategory::Authentication,
            ArchitectError::ProviderError { .. } => ErrorCategory::Provider,
            ArchitectError::SerializationError(_)
            | ArchitectError::ProcessingError { .. }
            | ArchitectError::ValidationError { .. } => ErrorCategory::Data,
            ArchitectError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Authentication => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the watsonx endpoint URL",
            ErrorCategory::Configuration => {
                "Review the command line flags, environment variables and scoring config file"
            }
            ErrorCategory::Authentication => "Verify WATSONX_API_KEY and the IAM token endpoint",
            ErrorCategory::Provider => "Check MODEL_ID, WATSONX_PROJECT_ID and provider quota",
            ErrorCategory::Data => "Check the request payload format",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ArchitectError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            ArchitectError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ArchitectError::AuthenticationError { .. } => {
                "Could not authenticate with IBM Cloud".to_string()
            }
            ArchitectError::ProviderError { status, .. } => {
                format!("The AI provider rejected the request (HTTP {})", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchitectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_severity() {
        let err = ArchitectError::MissingConfigError {
            field: "WATSONX_API_KEY".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = ArchitectError::ProviderError {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Provider);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("503"));
    }
}
