//! Admin handlers for accepted proposals awaiting manual verification.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, ProposalId};
use crate::domain::proposal::{Proposal, ProposalError};
use crate::ports::ProposalRepository;

const ADMIN_ONLY: &str = "Only administrators can review agreements.";

fn require_admin(user: &AuthenticatedUser) -> Result<(), ProposalError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ProposalError::forbidden(ADMIN_ONLY))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pending agreements
// ════════════════════════════════════════════════════════════════════════════

pub struct ListPendingAgreementsHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl ListPendingAgreementsHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    /// Accepted proposals not yet verified, oldest acceptance first.
    pub async fn handle(&self, admin: &AuthenticatedUser) -> Result<Vec<Proposal>, ProposalError> {
        require_admin(admin)?;
        Ok(self.repository.find_awaiting_verification().await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Verification
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct VerifyAgreementsCommand {
    pub proposal_ids: Vec<ProposalId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyAgreementsResult {
    /// Proposals stamped as verified by this call.
    pub verified: Vec<ProposalId>,
    /// Unknown, not accepted, or already verified.
    pub skipped: Vec<ProposalId>,
}

impl VerifyAgreementsResult {
    /// One confirmation line per verified proposal.
    pub fn messages(&self) -> Vec<String> {
        self.verified
            .iter()
            .map(|id| format!("Proposal {} verified and archived.", id))
            .collect()
    }
}

pub struct VerifyAgreementsHandler {
    repository: Arc<dyn ProposalRepository>,
}

impl VerifyAgreementsHandler {
    pub fn new(repository: Arc<dyn ProposalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: VerifyAgreementsCommand,
        admin: &AuthenticatedUser,
    ) -> Result<VerifyAgreementsResult, ProposalError> {
        require_admin(admin)?;

        let mut result = VerifyAgreementsResult::default();
        for id in cmd.proposal_ids {
            let Some(mut proposal) = self.repository.find_by_id(&id).await? else {
                result.skipped.push(id);
                continue;
            };

            match proposal.mark_verified() {
                Ok(true) => {
                    self.repository.update(&proposal).await?;
                    info!(proposal_id = %id, admin = %admin.id, "Agreement verified");
                    result.verified.push(id);
                }
                Ok(false) | Err(_) => result.skipped.push(id),
            }
        }
        Ok(result)
    }
}
