//!
//! # Export Result and Error Types
//!

// Std-Lib
use std::path::PathBuf;

// Local Imports
pub use crate::utils::{self, ErrorContext};

/// # [ExportError] Result Type
pub type ExportResult<T> = Result<T, ExportError>;

///
/// # Export Error Enumeration
///
pub enum ExportError {
    /// Malformed, degenerate, or non-terminating geometry decomposition.
    /// Fatal: aborts the export, with no partial file written.
    Geometry {
        message: String,
        layer: Option<String>,
        stack: Vec<ErrorContext>,
    },
    /// Invalid configuration, rejected before the pipeline starts
    Validation { message: String },
    /// Destination-file write failure, identifying the path
    Write { path: PathBuf, message: String },
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl ExportError {
    /// Create an [ExportError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [ExportError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
    /// Create an [ExportError::Validation] from anything String-convertible
    pub fn validation(s: impl Into<String>) -> Self {
        Self::Validation { message: s.into() }
    }
    /// Create an [ExportError::Geometry] without layer attribution
    pub fn geometry(s: impl Into<String>) -> Self {
        Self::Geometry {
            message: s.into(),
            layer: None,
            stack: Vec::new(),
        }
    }
    /// Attribute this error to layer `label`, if it is a [ExportError::Geometry] without one
    pub fn in_layer(self, label: impl Into<String>) -> Self {
        match self {
            Self::Geometry {
                message,
                layer: None,
                stack,
            } => Self::Geometry {
                message,
                layer: Some(label.into()),
                stack,
            },
            other => other,
        }
    }
}
impl std::fmt::Debug for ExportError {
    /// Display an [ExportError]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExportError::Geometry {
                message,
                layer,
                stack,
            } => write!(
                f,
                "Geometry Error: \n - {} \n - layer: {:?} \n - {:?}",
                message, layer, stack
            ),
            ExportError::Validation { message } => {
                write!(f, "Validation Error: \n - {}", message)
            }
            ExportError::Write { path, message } => {
                write!(f, "Write Error: \n - {:?} \n - {}", path, message)
            }
            ExportError::Boxed(err) => err.fmt(f),
            ExportError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for ExportError {
    /// Display an [ExportError]
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<String> for ExportError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for ExportError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<std::num::TryFromIntError> for ExportError {
    fn from(e: std::num::TryFromIntError) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<utils::ser::Error> for ExportError {
    fn from(e: utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<gpf21::GpfError> for ExportError {
    /// Forward a [gpf21::GpfError], preserving write-failures' path attribution
    fn from(e: gpf21::GpfError) -> Self {
        match e {
            gpf21::GpfError::Write { path, message } => Self::Write { path, message },
            other => Self::Str(other.to_string()),
        }
    }
}
