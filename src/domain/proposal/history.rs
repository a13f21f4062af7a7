//! Proposal history - superseded terms captured at each counter-offer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HistoryEntryId, ProposalId, Timestamp};

use super::DutyTerms;

/// Append-only snapshot of the terms a counter-offer replaced.
///
/// Entries are created once by `Proposal::counter`, never mutated, and only
/// removed together with their proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalHistory {
    id: HistoryEntryId,
    proposal_id: ProposalId,
    terms: DutyTerms,
    created_at: Timestamp,
}

impl ProposalHistory {
    pub(crate) fn snapshot(proposal_id: ProposalId, terms: DutyTerms) -> Self {
        Self {
            id: HistoryEntryId::new(),
            proposal_id,
            terms,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute an entry from persistence.
    pub fn reconstitute(
        id: HistoryEntryId,
        proposal_id: ProposalId,
        terms: DutyTerms,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            proposal_id,
            terms,
            created_at,
        }
    }

    pub fn id(&self) -> &HistoryEntryId {
        &self.id
    }

    pub fn proposal_id(&self) -> &ProposalId {
        &self.proposal_id
    }

    pub fn sender_duties(&self) -> &str {
        self.terms.sender_duties()
    }

    pub fn receiver_duties(&self) -> &str {
        self.terms.receiver_duties()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
