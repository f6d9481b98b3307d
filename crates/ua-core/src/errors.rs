//! Structured error types shared across UA crates.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named value recorded on an error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Name of the recorded value (an index, a size, a pair).
    pub key: String,
    /// The rendered value.
    pub value: String,
}

/// Structured payload attached to every [`UaError`] variant.
///
/// The payload names the violated rule through a stable machine code and
/// records the offending indices and sizes as context entries, kept in the
/// order the failing call attached them so the rendering reads like the
/// validation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Named values attached by the failing call, in attachment order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ContextEntry>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: Vec::new(),
            hint: None,
        }
    }

    /// Appends a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.push(ContextEntry {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Looks up a context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        for entry in &self.context {
            write!(f, "; {}={}", entry.key, entry.value)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

/// Canonical error type for the UA engine.
///
/// Variants follow the failure taxonomy of the engine: argument validation,
/// congruence compatibility at module boundaries, exhausted enumeration
/// budgets, and unmet algorithm preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum UaError {
    /// An argument failed range or shape validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// A partition claimed to be a congruence is not compatible with every operation.
    #[error("not a congruence: {0}")]
    NotCongruence(ErrorInfo),
    /// An enumeration or search budget was exhausted.
    #[error("resource exceeded: {0}")]
    ResourceExceeded(ErrorInfo),
    /// An algorithm precondition is not met by the input algebra.
    #[error("unsupported: {0}")]
    Unsupported(ErrorInfo),
}

impl UaError {
    /// Builds an [`UaError::InvalidArgument`] with the given code and message.
    pub fn invalid_argument(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument(ErrorInfo::new(code, message))
    }

    /// Builds an [`UaError::NotCongruence`] with the given code and message.
    pub fn not_congruence(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotCongruence(ErrorInfo::new(code, message))
    }

    /// Builds an [`UaError::ResourceExceeded`] with the given code and message.
    pub fn resource_exceeded(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResourceExceeded(ErrorInfo::new(code, message))
    }

    /// Builds an [`UaError::Unsupported`] with the given code and message.
    pub fn unsupported(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unsupported(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the payload of this error.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            UaError::InvalidArgument(info) => {
                UaError::InvalidArgument(info.with_context(key, value))
            }
            UaError::NotCongruence(info) => UaError::NotCongruence(info.with_context(key, value)),
            UaError::ResourceExceeded(info) => {
                UaError::ResourceExceeded(info.with_context(key, value))
            }
            UaError::Unsupported(info) => UaError::Unsupported(info.with_context(key, value)),
        }
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            UaError::InvalidArgument(info)
            | UaError::NotCongruence(info)
            | UaError::ResourceExceeded(info)
            | UaError::Unsupported(info) => info,
        }
    }
}
