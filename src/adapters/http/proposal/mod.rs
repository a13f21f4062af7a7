//! HTTP adapter for proposal endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateProposalRequest, ErrorResponse, HistoryEntryResponse, NoticeResponse,
    NotificationsResponse, ProposalCommandResponse, ProposalDetailResponse, ProposalListResponse,
    ProposalResponse, RespondRequest, VerifyAgreementsRequest, VerifyAgreementsResponse,
};
pub use handlers::{health, ProposalHandlers, ProposalPorts};
pub use routes::proposal_routes;
