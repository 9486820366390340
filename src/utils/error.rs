use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomestayError {
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

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Booking {id} cannot move from {from} to {to}")]
    InvalidTransition { id: String, from: String, to: String },

    #[error("AI service error: {message}")]
    AiResponseError { message: String },

    #[error("Internal state error: {message}")]
    StateError { message: String },
}

pub type Result<T> = std::result::Result<T, HomestayError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Domain,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a command that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl HomestayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HomestayError::ApiError(_) | HomestayError::AiResponseError { .. } => {
                ErrorCategory::Network
            }
            HomestayError::ConfigError { .. }
            | HomestayError::ConfigValidationError { .. }
            | HomestayError::InvalidConfigValueError { .. }
            | HomestayError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HomestayError::SerializationError(_) => ErrorCategory::Data,
            HomestayError::NotFound { .. }
            | HomestayError::ValidationError { .. }
            | HomestayError::InvalidTransition { .. } => ErrorCategory::Domain,
            HomestayError::IoError(_) | HomestayError::StateError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Domain | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HomestayError::ApiError(e) if e.is_timeout() => {
                "The AI service took too long to answer.".to_string()
            }
            HomestayError::ApiError(_) => "Could not reach the AI service.".to_string(),
            HomestayError::AiResponseError { .. } => {
                "The AI service returned an unusable answer.".to_string()
            }
            HomestayError::NotFound { entity, id } => format!("No {} with id '{}'.", entity, id),
            HomestayError::ValidationError { message } => message.clone(),
            HomestayError::InvalidTransition { from, to, .. } => {
                format!("A {} booking cannot become {}.", from, to)
            }
            HomestayError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required.", field)
            }
            HomestayError::ConfigError { .. }
            | HomestayError::ConfigValidationError { .. }
            | HomestayError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HomestayError::ApiError(_) => "Check your network connection and the [ai] endpoint.",
            HomestayError::AiResponseError { .. } => "Retry the request or pick another model.",
            HomestayError::MissingConfigError { .. } => {
                "Set the value in the config file or export GEMINI_API_KEY."
            }
            HomestayError::ConfigError { .. }
            | HomestayError::ConfigValidationError { .. }
            | HomestayError::InvalidConfigValueError { .. } => {
                "Fix the config file and run the command again."
            }
            HomestayError::NotFound { .. } => "Run `myhomestay list` to see the available ids.",
            HomestayError::ValidationError { .. } => "Correct the input values and retry.",
            HomestayError::InvalidTransition { .. } => "Check the booking status first.",
            HomestayError::SerializationError(_) => "The data could not be encoded; report a bug.",
            HomestayError::IoError(_) => "Check file permissions and paths.",
            HomestayError::StateError { .. } => "Restart the process; in-memory state was lost.",
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        HomestayError::ValidationError {
            message: message.into(),
        }
    }

    pub(crate) fn poisoned(what: &str) -> Self {
        HomestayError::StateError {
            message: format!("{} lock poisoned", what),
        }
    }
}
