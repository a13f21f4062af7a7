//! Agreement queue port.
//!
//! Receives accepted proposals that are ready for an administrator's manual
//! (offline) verification.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::proposal::Proposal;

#[async_trait]
pub trait AgreementQueue: Send + Sync {
    /// Announce a newly accepted proposal.
    async fn new_agreement(&self, proposal: &Proposal) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_queue_is_object_safe() {
        fn _accepts_dyn(_q: &dyn AgreementQueue) {}
    }
}
