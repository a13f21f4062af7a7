//! Proposal-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, ValidationError};

/// Proposal-specific errors.
///
/// `IllegalTransition` is the only error the state machine itself raises;
/// the remaining variants come from request-boundary checks and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalError {
    /// Requested transition does not start from an allowed status.
    IllegalTransition(String),
    /// Input failed validation (e.g. a blank duty field on a counter-offer).
    ValidationFailed { field: String, message: String },
    /// Proposal was not found.
    NotFound(ProposalId),
    /// Caller is not allowed to perform the action.
    Forbidden(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProposalError {
    pub fn illegal_transition(message: impl Into<String>) -> Self {
        ProposalError::IllegalTransition(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProposalError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn not_found(id: ProposalId) -> Self {
        ProposalError::NotFound(id)
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        ProposalError::Forbidden(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProposalError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProposalError::IllegalTransition(_) => ErrorCode::InvalidStateTransition,
            ProposalError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProposalError::NotFound(_) => ErrorCode::ProposalNotFound,
            ProposalError::Forbidden(_) => ErrorCode::Forbidden,
            ProposalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProposalError::IllegalTransition(msg) => msg.clone(),
            ProposalError::ValidationFailed { message, .. } => message.clone(),
            ProposalError::NotFound(id) => format!("Proposal not found: {}", id),
            ProposalError::Forbidden(msg) => msg.clone(),
            ProposalError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, ProposalError::IllegalTransition(_))
    }
}

impl std::fmt::Display for ProposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProposalError {}

impl From<DomainError> for ProposalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ProposalError::IllegalTransition(err.message),
            ErrorCode::ValidationFailed => ProposalError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ProposalError::Forbidden(err.message),
            _ => ProposalError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ProposalError {
    fn from(err: ValidationError) -> Self {
        ProposalError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
