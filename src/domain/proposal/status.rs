//! ProposalStatus enum for tracking the negotiation lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a proposal.
///
/// ```text
/// Draft ──► Sent ──► Accepted
///             │  └─► Rejected
///             └────► Countered ──► Accepted | Rejected | Countered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Countered,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 5] = [
        ProposalStatus::Draft,
        ProposalStatus::Sent,
        ProposalStatus::Accepted,
        ProposalStatus::Rejected,
        ProposalStatus::Countered,
    ];

    /// True while the receiving side (or the sender, after a counter) can answer.
    pub fn is_open_for_response(&self) -> bool {
        matches!(self, ProposalStatus::Sent | ProposalStatus::Countered)
    }

    /// Single-letter storage code.
    pub fn code(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "D",
            ProposalStatus::Sent => "S",
            ProposalStatus::Accepted => "A",
            ProposalStatus::Rejected => "R",
            ProposalStatus::Countered => "C",
        }
    }

    /// Parses a single-letter storage code.
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        match code {
            "D" => Ok(ProposalStatus::Draft),
            "S" => Ok(ProposalStatus::Sent),
            "A" => Ok(ProposalStatus::Accepted),
            "R" => Ok(ProposalStatus::Rejected),
            "C" => Ok(ProposalStatus::Countered),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown proposal status code '{}'", other),
            )),
        }
    }
}

impl StateMachine for ProposalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ProposalStatus::*;
        matches!(
            (self, target),
            (Draft, Sent)
                | (Sent, Accepted)
                | (Sent, Rejected)
                | (Sent, Countered)
                | (Countered, Accepted)
                | (Countered, Rejected)
                | (Countered, Countered)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ProposalStatus::*;
        match self {
            Draft => vec![Sent],
            Sent | Countered => vec![Accepted, Rejected, Countered],
            Accepted | Rejected => vec![],
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProposalStatus::Draft => "Draft",
            ProposalStatus::Sent => "Sent",
            ProposalStatus::Accepted => "Accepted",
            ProposalStatus::Rejected => "Rejected",
            ProposalStatus::Countered => "Countered",
        };
        write!(f, "{}", s)
    }
}
