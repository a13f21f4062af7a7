//! Proposal command and query handlers.

mod create_proposal;
mod drain_notifications;
mod get_proposal;
mod list_my_proposals;
mod respond_to_proposal;
mod transition_service;
mod verify_agreements;

pub use create_proposal::{CreateProposalCommand, CreateProposalHandler, CreateProposalResult};
pub use drain_notifications::DrainNotificationsHandler;
pub use get_proposal::{GetProposalHandler, GetProposalQuery, ProposalDetail};
pub use list_my_proposals::{ListMyProposalsHandler, ListMyProposalsQuery};
pub use respond_to_proposal::{
    RespondToProposalCommand, RespondToProposalHandler, RespondToProposalResult, ResponseAction,
};
pub use transition_service::ProposalTransitionService;
pub use verify_agreements::{
    ListPendingAgreementsHandler, VerifyAgreementsCommand, VerifyAgreementsHandler,
    VerifyAgreementsResult,
};
