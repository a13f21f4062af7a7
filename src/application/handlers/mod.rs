//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod proposal;

pub use proposal::{
    // Transitions
    ProposalTransitionService,
    // Commands
    CreateProposalCommand, CreateProposalHandler, CreateProposalResult,
    RespondToProposalCommand, RespondToProposalHandler, RespondToProposalResult, ResponseAction,
    VerifyAgreementsCommand, VerifyAgreementsHandler, VerifyAgreementsResult,
    // Queries
    GetProposalHandler, GetProposalQuery, ProposalDetail,
    ListMyProposalsHandler, ListMyProposalsQuery,
    ListPendingAgreementsHandler,
    DrainNotificationsHandler,
};
