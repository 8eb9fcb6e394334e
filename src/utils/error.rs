use thiserror::Error;

#[derive(Error, Debug)]
pub enum FunnelError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Lead submission failed: {0}")]
    SubmissionError(#[from] crate::core::submission::SubmissionError),

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FunnelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FunnelError::ConfigError { .. }
            | FunnelError::ConfigValidationError { .. }
            | FunnelError::InvalidConfigValueError { .. }
            | FunnelError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FunnelError::HttpError(_) | FunnelError::SubmissionError(_) => ErrorCategory::Network,
            FunnelError::ValidationError { .. } => ErrorCategory::Data,
            FunnelError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // a failed lead can always be resubmitted
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for the CLI; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the funnel TOML file and the environment variables it references"
            }
            ErrorCategory::Network => "Check connectivity to the store and submit again",
            ErrorCategory::Data => "Correct the lead fields and submit again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FunnelError::SubmissionError(e) => e.to_string(),
            FunnelError::ValidationError { message } => message.clone(),
            FunnelError::MissingConfigError { field } => {
                format!("Missing configuration value: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FunnelError>;
