use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    System,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::ConfigValidationError { .. }
            | ProbeError::InvalidConfigValueError { .. }
            | ProbeError::MissingConfigError { .. }
            | ProbeError::TomlError(_)
            | ProbeError::UrlError(_) => ErrorCategory::Configuration,
            ProbeError::IoError(_) => ErrorCategory::System,
            ProbeError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProbeError::MissingConfigError { field } => format!(
                "Provide '{}' via a CLI flag, an environment variable, .env or --config",
                field
            ),
            ProbeError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' and try again", field)
            }
            ProbeError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' setting in your configuration", field)
            }
            ProbeError::TomlError(_) => "Check the TOML syntax of the config file".to_string(),
            ProbeError::UrlError(_) => {
                "Use a full http(s) URL such as https://cloud.example.com".to_string()
            }
            ProbeError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ProbeError::SerializationError(_) => "Check the JSON input".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProbeError::MissingConfigError { field } => {
                format!("Missing setting: {}", field)
            }
            ProbeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
