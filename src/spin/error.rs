//! Error types shared by the spin engine.

use std::fmt;
use thiserror::Error;

/// Which side of an alternation group was left without a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    UnmatchedOpen,
    UnmatchedClose,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::UnmatchedOpen => write!(f, "unmatched open marker"),
            MalformedKind::UnmatchedClose => write!(f, "unmatched close marker"),
        }
    }
}

/// Errors raised by configuration setters and the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    /// A configuration value does not have the required shape.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The template cannot be resolved because its groups do not pair up.
    #[error("malformed template: {kind} at byte {position}")]
    MalformedTemplate { kind: MalformedKind, position: usize },
}

impl SpinError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SpinError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn unmatched_open(position: usize) -> Self {
        SpinError::MalformedTemplate {
            kind: MalformedKind::UnmatchedOpen,
            position,
        }
    }

    pub(crate) fn unmatched_close(position: usize) -> Self {
        SpinError::MalformedTemplate {
            kind: MalformedKind::UnmatchedClose,
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpinError>;
