use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarstoolError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Vehicle not found: {id}")]
    NotFound { id: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

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

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    NotFound,
    Transport,
    Config,
    System,
}

impl CarstoolError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingField { .. } | Self::InvalidField { .. } | Self::Serialization(_) => {
                ErrorCategory::Data
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Transport(_) | Self::UnexpectedStatus { .. } => ErrorCategory::Transport,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    /// Transport failures are recoverable by repeating the user action.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Data => format!("The vehicle data is incomplete: {}", self),
            ErrorCategory::NotFound => "Vehicle not found.".to_string(),
            ErrorCategory::Transport => "Unable to reach the vehicle service.".to_string(),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Data => "Report the record to the data maintainers",
            ErrorCategory::NotFound => "Check the vehicle id with `carstool list`",
            ErrorCategory::Transport => "Check that the backend is running and retry",
            ErrorCategory::Config => "Fix the config file or command line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CarstoolError>;
