// replica-core - Error types for the copy engine
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for deep copying.

use replica_value::Shape;
use thiserror::Error;

/// Result type for copy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while copying a value.
///
/// A failed copy returns no partial clone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Value matches no copy category
    #[error("Cannot copy {type_name}: {reason}")]
    UnclassifiableShape { type_name: String, reason: String },
    /// Member has a setter but no getter
    #[error("Cannot read member '{member}' of {shape}: no getter")]
    UnreadableMember { shape: String, member: String },
    /// Member has a getter but no setter
    #[error("Cannot write member '{member}' of {shape}: no setter")]
    UnwritableMember { shape: String, member: String },
    /// Record type cannot be zero-initialized
    #[error("Cannot construct an instance of {shape}")]
    UnconstructibleShape { shape: String },
    /// Input is nested deeper than the configured limit
    #[error("Value nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    /// Value could not be converted to the requested Rust type
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    /// Internal error - invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unclassifiable-shape error.
    pub fn unclassifiable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnclassifiableShape {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn unreadable(shape: &Shape, member: &str) -> Self {
        Error::UnreadableMember {
            shape: shape.name().to_string(),
            member: member.to_string(),
        }
    }

    pub fn unwritable(shape: &Shape, member: &str) -> Self {
        Error::UnwritableMember {
            shape: shape.name().to_string(),
            member: member.to_string(),
        }
    }

    pub fn unconstructible(shape: &Shape) -> Self {
        Error::UnconstructibleShape {
            shape: shape.name().to_string(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}
