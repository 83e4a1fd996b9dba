//! Framework-wide error types
//!
//! Every error that can escape a handler ends up as a [`FrameworkError`], which
//! knows its HTTP status code and the message placed in the response envelope.

use thiserror::Error;

/// Simple wrapper for one-off application errors
///
/// # Example
///
/// ```rust,ignore
/// use kit::AppError;
///
/// if input.name.is_empty() {
///     return Err(AppError::bad_request("Name is required").into());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    message: String,
    status_code: u16,
}

impl AppError {
    /// The message placed in the response envelope
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Create a new AppError with status 500 (Internal Server Error)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: 500,
        }
    }

    /// Set the HTTP status code
    pub fn status(mut self, code: u16) -> Self {
        self.status_code = code;
        self
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message).status(400)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).status(404)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(message).status(405)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message).status(409)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for FrameworkError {
    fn from(e: AppError) -> Self {
        FrameworkError::Domain {
            message: e.message,
            status_code: e.status_code,
        }
    }
}

/// Framework-wide error type
///
/// Converts into an error envelope (`{"success": false, "message": ...}`)
/// with the status from [`FrameworkError::status_code`], so handlers can use
/// `?` on anything that converts into it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameworkError {
    /// Service not found in the container
    #[error("Service '{type_name}' not registered in container")]
    ServiceNotFound { type_name: &'static str },

    /// A route parameter the handler asked for was not captured
    #[error("Missing required parameter: {param_name}")]
    ParamError { param_name: String },

    /// A route parameter could not be parsed into the expected type
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        param: String,
        expected_type: &'static str,
    },

    /// Request body was not valid JSON for the target type
    #[error("Invalid JSON format")]
    InvalidJson { detail: String },

    /// Request body exceeded the configured limit
    #[error("Request body too large")]
    PayloadTooLarge { limit: usize },

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Application error with a custom status code
    #[error("{message}")]
    Domain { message: String, status_code: u16 },
}

impl FrameworkError {
    /// Create a ServiceNotFound error for a given type
    pub fn service_not_found<T: ?Sized>() -> Self {
        Self::ServiceNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a ParamError for a missing parameter
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    /// Create a ParamParse error (400)
    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    /// Create an InvalidJson error (400)
    pub fn invalid_json(detail: impl Into<String>) -> Self {
        Self::InvalidJson {
            detail: detail.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a Domain error with custom status code
    pub fn domain(message: impl Into<String>, status_code: u16) -> Self {
        Self::Domain {
            message: message.into(),
            status_code,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServiceNotFound { .. } => 500,
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::InvalidJson { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Internal { .. } => 500,
            Self::Domain { status_code, .. } => *status_code,
        }
    }

    /// Message shown to the client
    ///
    /// Internal details stay in the logs; the envelope only carries the
    /// generic text for 5xx errors.
    pub fn public_message(&self) -> String {
        match self {
            Self::ServiceNotFound { .. } | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}
