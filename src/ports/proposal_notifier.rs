//! Proposal notifier port.
//!
//! Formats and delivers the user-facing message for each transition. The
//! transition service depends only on this trait, so the in-app adapter can
//! be replaced by an e-mail or SMS channel without touching it.
//!
//! # Example
//!
//! ```ignore
//! proposal.accept()?;
//! repository.update(&proposal).await?;
//! notifier.accepted(&proposal, &ctx).await?;
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::proposal::{ActingContext, Notice, Proposal};

/// Port for transition notifications.
///
/// Each transition method receives the proposal *after* the transition and
/// the acting context of the request that caused it.
#[async_trait]
pub trait ProposalNotifier: Send + Sync {
    /// Draft was sent to the receiver.
    async fn new_proposal(&self, proposal: &Proposal, ctx: &ActingContext)
        -> Result<(), DomainError>;

    /// Proposal was rejected.
    async fn rejected(&self, proposal: &Proposal, ctx: &ActingContext) -> Result<(), DomainError>;

    /// Proposal was accepted.
    async fn accepted(&self, proposal: &Proposal, ctx: &ActingContext) -> Result<(), DomainError>;

    /// Proposal was countered with new terms.
    async fn countered(&self, proposal: &Proposal, ctx: &ActingContext)
        -> Result<(), DomainError>;

    /// Deliver a notice to a party outside the current request.
    async fn deliver(&self, recipient: &UserId, notice: Notice) -> Result<(), DomainError>;
}

/// Port for reading notices delivered to a party.
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Remove and return every pending notice for `user_id`, oldest first.
    async fn drain(&self, user_id: &UserId) -> Result<Vec<Notice>, DomainError>;
}
