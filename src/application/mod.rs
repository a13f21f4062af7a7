//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change proposals through `ProposalTransitionService`;
//! query handlers only read.

pub mod handlers;

pub use handlers::{
    CreateProposalCommand, CreateProposalHandler, CreateProposalResult,
    DrainNotificationsHandler, GetProposalHandler, GetProposalQuery, ListMyProposalsHandler,
    ListMyProposalsQuery, ListPendingAgreementsHandler, ProposalDetail, ProposalTransitionService,
    RespondToProposalCommand, RespondToProposalHandler, RespondToProposalResult, ResponseAction,
    VerifyAgreementsCommand, VerifyAgreementsHandler, VerifyAgreementsResult,
};
