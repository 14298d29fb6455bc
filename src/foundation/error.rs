/// Convenience result type used across yeargrid.
pub type YearGridResult<T> = Result<T, YearGridError>;

/// Top-level error taxonomy used by calendar, generator and renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum YearGridError {
    /// Invalid caller-provided request data (unknown model, malformed date, unknown format).
    #[error("validation error: {0}")]
    Validation(String),

    /// Pre-rendered overlay assets are missing or unusable.
    #[error("asset error: {0}")]
    Asset(String),

    /// Geometry, layout or raster failures while producing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification callers map onto their transport (for example HTTP 400 vs 500).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The request itself was wrong; retrying it unchanged will fail again.
    BadRequest,
    /// Server-side failure (missing assets, codec failure).
    Internal,
}

impl YearGridError {
    /// Build a [`YearGridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`YearGridError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`YearGridError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`YearGridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Classify this error as a client or server failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::BadRequest,
            Self::Asset(_) | Self::Render(_) | Self::Serde(_) | Self::Other(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// HTTP-equivalent status code for [`Self::class`].
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::BadRequest => 400,
            ErrorClass::Internal => 500,
        }
    }

    /// Structured response body for this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code(),
            error: self.class(),
            message: format!("{self:#}"),
        }
    }
}

/// Plain structured error body distinguishing bad requests from internal failures.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ErrorResponse {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Error class.
    pub error: ErrorClass,
    /// Human-readable message including the underlying cause chain.
    pub message: String,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
