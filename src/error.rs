use thiserror::Error;

/// Failure of a form check made before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Missing(&'static str),

    #[error("Amount must be a number.")]
    InvalidAmount,

    #[error("Amount must be greater than zero.")]
    NonPositiveAmount,

    #[error("Budget limit cannot be negative.")]
    NegativeLimit,

    #[error("Date must be in YYYY-MM-DD format.")]
    InvalidDate,

    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Network(String),

    /// Non-2xx response. `message` is the server's `error` field when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
