//! User-facing notices raised by the negotiation workflow.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ProposalId;
use crate::domain::party::PartyProfile;

/// Severity of a notice, mirroring flash-message levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, text)
    }

    fn with_level(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transition messages
    // ─────────────────────────────────────────────────────────────────────────

    pub fn new_proposal(id: &ProposalId, sender_name: &str) -> Self {
        Self::info(format!("New proposal #{} from {}", id, sender_name))
    }

    pub fn rejected(id: &ProposalId) -> Self {
        Self::warning(format!("Proposal #{} has been rejected.", id))
    }

    pub fn accepted(id: &ProposalId) -> Self {
        Self::success(format!(
            "Proposal #{} accepted - waiting for admin verification.",
            id
        ))
    }

    pub fn countered(id: &ProposalId) -> Self {
        Self::info(format!("Proposal #{} countered - please review", id))
    }

    /// Sentence sent to the counterpart when `rejecter` turns an offer down.
    pub fn rejection_sentence(rejecter: &PartyProfile) -> Self {
        match rejecter.business() {
            Some(business) => {
                Self::rejected_by(&format!("{}, {}", rejecter.display_name(), business))
            }
            None => Self::rejected_by(&rejecter.display_name()),
        }
    }

    /// Same sentence for a rejecting party known only by `who`.
    pub fn rejected_by(who: &str) -> Self {
        Self::info(format!(
            "{} was unable to fulfil the terms and has rejected your proposal offer.",
            who
        ))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
