//! HTTP DTOs for proposal endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{ProposalDetail, ResponseAction, VerifyAgreementsResult};
use crate::domain::proposal::{Notice, NoticeLevel, Proposal, ProposalHistory, ProposalStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create (and immediately send) a proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposalRequest {
    pub receiver_id: String,
    pub sender_duties: String,
    #[serde(default)]
    pub receiver_duties: Option<String>,
}

/// Request to answer a proposal.
///
/// ```json
/// {"action": "counter", "sender_duties": "...", "receiver_duties": "..."}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RespondRequest {
    Accept,
    Reject,
    Counter {
        #[serde(default)]
        sender_duties: String,
        #[serde(default)]
        receiver_duties: String,
    },
}

impl From<RespondRequest> for ResponseAction {
    fn from(req: RespondRequest) -> Self {
        match req {
            RespondRequest::Accept => ResponseAction::Accept,
            RespondRequest::Reject => ResponseAction::Reject,
            RespondRequest::Counter {
                sender_duties,
                receiver_duties,
            } => ResponseAction::Counter {
                sender_duties,
                receiver_duties,
            },
        }
    }
}

/// Admin request to mark accepted proposals as verified.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyAgreementsRequest {
    pub proposal_ids: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeResponse {
    pub level: NoticeLevel,
    pub text: String,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            level: notice.level,
            text: notice.text,
        }
    }
}

fn notices(list: Vec<Notice>) -> Vec<NoticeResponse> {
    list.into_iter().map(Into::into).collect()
}

/// Proposal view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub id: String,
    pub status: ProposalStatus,
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_duties: String,
    pub receiver_duties: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<String>,
}

impl From<&Proposal> for ProposalResponse {
    fn from(p: &Proposal) -> Self {
        Self {
            id: p.id().to_string(),
            status: p.status(),
            sender_id: p.sender().to_string(),
            receiver_id: p.receiver().to_string(),
            sender_duties: p.sender_duties().to_string(),
            receiver_duties: p.receiver_duties().to_string(),
            created_at: p.created_at().to_rfc3339(),
            updated_at: p.updated_at().to_rfc3339(),
            verified_at: p.verified_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    pub id: String,
    pub sender_duties: String,
    pub receiver_duties: String,
    pub created_at: String,
}

impl From<&ProposalHistory> for HistoryEntryResponse {
    fn from(h: &ProposalHistory) -> Self {
        Self {
            id: h.id().to_string(),
            sender_duties: h.sender_duties().to_string(),
            receiver_duties: h.receiver_duties().to_string(),
            created_at: h.created_at().to_rfc3339(),
        }
    }
}

/// Proposal plus its superseded terms, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDetailResponse {
    pub proposal: ProposalResponse,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<ProposalDetail> for ProposalDetailResponse {
    fn from(detail: ProposalDetail) -> Self {
        Self {
            proposal: (&detail.proposal).into(),
            history: detail.history.iter().map(Into::into).collect(),
        }
    }
}

/// Result of a create or respond call, with the messages for the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalCommandResponse {
    pub proposal: ProposalResponse,
    pub notices: Vec<NoticeResponse>,
}

impl ProposalCommandResponse {
    pub fn new(proposal: &Proposal, collected: Vec<Notice>) -> Self {
        Self {
            proposal: proposal.into(),
            notices: notices(collected),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalListResponse {
    pub items: Vec<ProposalResponse>,
}

impl From<Vec<Proposal>> for ProposalListResponse {
    fn from(list: Vec<Proposal>) -> Self {
        Self {
            items: list.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notices: Vec<NoticeResponse>,
}

impl From<Vec<Notice>> for NotificationsResponse {
    fn from(list: Vec<Notice>) -> Self {
        Self {
            notices: notices(list),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAgreementsResponse {
    pub verified: Vec<String>,
    pub skipped: Vec<String>,
    pub messages: Vec<String>,
}

impl From<VerifyAgreementsResult> for VerifyAgreementsResponse {
    fn from(result: VerifyAgreementsResult) -> Self {
        Self {
            messages: result.messages(),
            verified: result.verified.iter().map(ToString::to_string).collect(),
            skipped: result.skipped.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<NoticeResponse>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            notices: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_notices(mut self, collected: Vec<Notice>) -> Self {
        self.notices.extend(notices(collected));
        self
    }
}
