use thiserror::Error;

#[derive(Error, Debug)]
pub enum SellerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input '{value}' for '{field}': {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Offering not found: {id}")]
    OfferingNotFound { id: String },

    #[error("No offering selected")]
    NoOfferingSelected,

    #[error("Offering '{id}' is not available")]
    OfferingUnavailable { id: String },

    #[error("Order submission failed (status {status:?}): {message}")]
    SubmissionFailed {
        status: Option<u16>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
    Input,
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SellerError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        SellerError::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SellerError::ApiError(_) | SellerError::SubmissionFailed { .. } => {
                ErrorCategory::Network
            }
            SellerError::IoError(_) => ErrorCategory::Io,
            SellerError::SerializationError(_) => ErrorCategory::Data,
            SellerError::ConfigError { .. }
            | SellerError::ConfigValidationError { .. }
            | SellerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SellerError::ValidationError { .. } => ErrorCategory::Input,
            SellerError::OfferingNotFound { .. }
            | SellerError::NoOfferingSelected
            | SellerError::OfferingUnavailable { .. } => ErrorCategory::Catalog,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SellerError::NoOfferingSelected | SellerError::OfferingUnavailable { .. } => {
                ErrorSeverity::Low
            }
            SellerError::ApiError(_) | SellerError::SubmissionFailed { .. } => {
                ErrorSeverity::Medium
            }
            SellerError::ValidationError { .. }
            | SellerError::OfferingNotFound { .. }
            | SellerError::SerializationError(_) => ErrorSeverity::High,
            SellerError::IoError(_)
            | SellerError::ConfigError { .. }
            | SellerError::ConfigValidationError { .. }
            | SellerError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SellerError::ApiError(_) => "Check that the order-intake endpoint is reachable",
            SellerError::SubmissionFailed { .. } => {
                "Inspect the order-intake response and retry the publish"
            }
            SellerError::IoError(_) => "Check file paths and permissions",
            SellerError::SerializationError(_) => "Make sure the input file is valid JSON",
            SellerError::ConfigError { .. }
            | SellerError::ConfigValidationError { .. }
            | SellerError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            SellerError::ValidationError { .. } => {
                "Use non-negative numbers for energy and price"
            }
            SellerError::OfferingNotFound { .. } => {
                "List offerings with the `offerings` command to find a valid id"
            }
            SellerError::NoOfferingSelected => "Select an offering before publishing",
            SellerError::OfferingUnavailable { .. } => {
                "Mark the offering as available to publish"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SellerError::ApiError(_) | SellerError::SubmissionFailed { .. } => {
                format!("Could not publish the offering: {}", self)
            }
            SellerError::ValidationError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            SellerError::OfferingUnavailable { id } => {
                format!("Offering {} is not available and cannot be published", id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SellerError>;
