use std::fmt;

use thiserror::Error;

use super::path::NodePath;

/// Structured failure produced by validation or decoding. Every variant names the node path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("{path}: {kind} is missing required field '{field}'")]
    MissingRequiredField {
        path: NodePath,
        kind: &'static str,
        field: &'static str,
    },
    #[error("{path}: {kind} field '{field}' is invalid: {reason}")]
    InvalidFieldValue {
        path: NodePath,
        kind: &'static str,
        field: &'static str,
        reason: String,
    },
    #[error("{path}: expected {expected}, found '{found}'")]
    TypeMismatch {
        path: NodePath,
        expected: &'static str,
        found: String,
    },
    #[error("{path}: unknown node kind '{kind}'")]
    UnknownKind { path: NodePath, kind: String },
    #[error("{path}: malformed wire data: {message}")]
    MalformedWire { path: NodePath, message: String },
}

impl CardError {
    pub fn path(&self) -> &NodePath {
        match self {
            Self::MissingRequiredField { path, .. }
            | Self::InvalidFieldValue { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::UnknownKind { path, .. }
            | Self::MalformedWire { path, .. } => path,
        }
    }

    /// Stable snake_case identifier for the error category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidFieldValue { .. } => "invalid_field_value",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::UnknownKind { .. } => "unknown_kind",
            Self::MalformedWire { .. } => "malformed_wire",
        }
    }

    pub(crate) fn malformed(path: &NodePath, message: impl Into<String>) -> Self {
        Self::MalformedWire {
            path: path.clone(),
            message: message.into(),
        }
    }
}

/// Every problem found by a validation pass, in traversal order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<CardError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<CardError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn first(&self) -> &CardError {
        &self.0[0]
    }

    pub fn errors(&self) -> &[CardError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<CardError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .0
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "card validation failed: {message}")
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for CardError {
    fn from(errors: ValidationErrors) -> Self {
        errors.0.into_iter().next().unwrap_or_else(|| CardError::MalformedWire {
            path: NodePath::root(),
            message: "empty validation report".into(),
        })
    }
}

impl IntoIterator for ValidationErrors {
    type Item = CardError;
    type IntoIter = std::vec::IntoIter<CardError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
