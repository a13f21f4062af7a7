//! Duty terms - the pair of commitments a proposal negotiates.

use serde::{Deserialize, Serialize};

use super::ProposalError;

/// Maximum length of a single duty text.
pub const MAX_DUTY_LENGTH: usize = 10_000;

const COUNTER_DUTIES_REQUIRED: &str = "Both duty fields are required for a counter-proposal.";

/// What each side commits to.
///
/// # Invariants
///
/// - `sender_duties` is never blank
/// - on counter-offers `receiver_duties` is never blank either
/// - both texts are at most `MAX_DUTY_LENGTH` characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyTerms {
    sender_duties: String,
    receiver_duties: String,
}

impl DutyTerms {
    /// Terms for a new proposal. The receiver's side may be left open.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if sender duties are blank or either text is too long
    pub fn opening(
        sender_duties: impl Into<String>,
        receiver_duties: Option<String>,
    ) -> Result<Self, ProposalError> {
        let sender_duties = sender_duties.into();
        let receiver_duties = receiver_duties.unwrap_or_default();
        if sender_duties.trim().is_empty() {
            return Err(ProposalError::validation(
                "sender_duties",
                "Your commitments cannot be empty.",
            ));
        }
        check_length("sender_duties", &sender_duties)?;
        check_length("receiver_duties", &receiver_duties)?;
        Ok(Self {
            sender_duties,
            receiver_duties,
        })
    }

    /// Terms for a counter-offer. Both sides must be spelled out.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either text is blank or too long
    pub fn counter(
        sender_duties: impl Into<String>,
        receiver_duties: impl Into<String>,
    ) -> Result<Self, ProposalError> {
        let sender_duties = sender_duties.into();
        let receiver_duties = receiver_duties.into();
        if sender_duties.trim().is_empty() {
            return Err(ProposalError::validation("sender_duties", COUNTER_DUTIES_REQUIRED));
        }
        if receiver_duties.trim().is_empty() {
            return Err(ProposalError::validation("receiver_duties", COUNTER_DUTIES_REQUIRED));
        }
        check_length("sender_duties", &sender_duties)?;
        check_length("receiver_duties", &receiver_duties)?;
        Ok(Self {
            sender_duties,
            receiver_duties,
        })
    }

    /// Rebuilds terms loaded from storage (no validation).
    pub fn reconstitute(sender_duties: String, receiver_duties: String) -> Self {
        Self {
            sender_duties,
            receiver_duties,
        }
    }

    pub fn sender_duties(&self) -> &str {
        &self.sender_duties
    }

    pub fn receiver_duties(&self) -> &str {
        &self.receiver_duties
    }
}

fn check_length(field: &str, text: &str) -> Result<(), ProposalError> {
    let len = text.chars().count();
    if len > MAX_DUTY_LENGTH {
        return Err(ProposalError::validation(
            field,
            format!("Duties must be {} characters or less", MAX_DUTY_LENGTH),
        ));
    }
    Ok(())
}
