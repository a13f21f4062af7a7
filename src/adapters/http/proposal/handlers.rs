//! HTTP handlers for proposal endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::{
    CreateProposalCommand, CreateProposalHandler, DrainNotificationsHandler, GetProposalHandler,
    GetProposalQuery, ListMyProposalsHandler, ListMyProposalsQuery, ListPendingAgreementsHandler,
    ProposalTransitionService, RespondToProposalCommand, RespondToProposalHandler,
    VerifyAgreementsCommand, VerifyAgreementsHandler,
};
use crate::domain::foundation::{AuthenticatedUser, ProposalId, UserId};
use crate::domain::proposal::{ActingContext, Notice, ProposalError};
use crate::ports::{
    AgreementQueue, NotificationInbox, PartyDirectory, ProposalNotifier, ProposalRepository,
};

use super::dto::{
    CreateProposalRequest, ErrorResponse, NotificationsResponse, ProposalCommandResponse,
    ProposalDetailResponse, ProposalListResponse, RespondRequest, VerifyAgreementsRequest,
    VerifyAgreementsResponse,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Ports the proposal endpoints are wired from.
#[derive(Clone)]
pub struct ProposalPorts {
    pub repository: Arc<dyn ProposalRepository>,
    pub directory: Arc<dyn PartyDirectory>,
    pub notifier: Arc<dyn ProposalNotifier>,
    pub inbox: Arc<dyn NotificationInbox>,
    pub agreements: Arc<dyn AgreementQueue>,
}

#[derive(Clone)]
pub struct ProposalHandlers {
    create_handler: Arc<CreateProposalHandler>,
    respond_handler: Arc<RespondToProposalHandler>,
    get_handler: Arc<GetProposalHandler>,
    list_handler: Arc<ListMyProposalsHandler>,
    notifications_handler: Arc<DrainNotificationsHandler>,
    pending_handler: Arc<ListPendingAgreementsHandler>,
    verify_handler: Arc<VerifyAgreementsHandler>,
}

impl ProposalHandlers {
    pub fn new(ports: ProposalPorts) -> Self {
        let transitions = Arc::new(ProposalTransitionService::new(
            ports.repository.clone(),
            ports.notifier.clone(),
            ports.agreements,
        ));

        Self {
            create_handler: Arc::new(CreateProposalHandler::new(
                ports.repository.clone(),
                ports.directory.clone(),
                transitions.clone(),
            )),
            respond_handler: Arc::new(RespondToProposalHandler::new(
                ports.repository.clone(),
                ports.directory,
                ports.notifier,
                transitions,
            )),
            get_handler: Arc::new(GetProposalHandler::new(ports.repository.clone())),
            list_handler: Arc::new(ListMyProposalsHandler::new(ports.repository.clone())),
            notifications_handler: Arc::new(DrainNotificationsHandler::new(ports.inbox)),
            pending_handler: Arc::new(ListPendingAgreementsHandler::new(
                ports.repository.clone(),
            )),
            verify_handler: Arc::new(VerifyAgreementsHandler::new(ports.repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/proposals - Create and send a proposal
pub async fn create_proposal(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Json(req): Json<CreateProposalRequest>,
) -> Response {
    let receiver = match UserId::new(req.receiver_id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Receiver is required")),
            )
                .into_response()
        }
    };

    let ctx = acting_context(&user, &headers);
    let cmd = CreateProposalCommand {
        receiver,
        sender_duties: req.sender_duties,
        receiver_duties: req.receiver_duties,
    };

    match handlers.create_handler.handle(cmd, &ctx).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ProposalCommandResponse::new(
                &result.proposal,
                ctx.notices.take(),
            )),
        )
            .into_response(),
        Err(e) => handle_proposal_error(e, ctx.notices.take()),
    }
}

/// GET /api/proposals - Proposals the caller sent or received
pub async fn list_proposals(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListMyProposalsQuery { user_id: user.id };

    match handlers.list_handler.handle(query).await {
        Ok(list) => (StatusCode::OK, Json(ProposalListResponse::from(list))).into_response(),
        Err(e) => handle_proposal_error(e, Vec::new()),
    }
}

/// GET /api/proposals/:id - Proposal details with history
pub async fn get_proposal(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(proposal_id): Path<String>,
) -> Response {
    let proposal_id = match parse_proposal_id(&proposal_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetProposalQuery {
        proposal_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(detail) => {
            (StatusCode::OK, Json(ProposalDetailResponse::from(detail))).into_response()
        }
        Err(e) => handle_proposal_error(e, Vec::new()),
    }
}

/// POST /api/proposals/:id/respond - Accept, reject or counter
pub async fn respond_to_proposal(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(proposal_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<RespondRequest>,
) -> Response {
    let proposal_id = match parse_proposal_id(&proposal_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let ctx = acting_context(&user, &headers);
    let cmd = RespondToProposalCommand {
        proposal_id,
        action: req.into(),
    };

    match handlers.respond_handler.handle(cmd, &ctx).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ProposalCommandResponse::new(
                &result.proposal,
                ctx.notices.take(),
            )),
        )
            .into_response(),
        Err(e) => handle_proposal_error(e, ctx.notices.take()),
    }
}

/// GET /api/notifications - Drain the caller's inbox
pub async fn drain_notifications(
    State(handlers): State<ProposalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.notifications_handler.handle(&user.id).await {
        Ok(notices) => {
            (StatusCode::OK, Json(NotificationsResponse::from(notices))).into_response()
        }
        Err(e) => handle_proposal_error(e, Vec::new()),
    }
}

/// GET /api/admin/agreements - Accepted proposals awaiting verification
pub async fn list_pending_agreements(
    State(handlers): State<ProposalHandlers>,
    RequireAdmin(admin): RequireAdmin,
) -> Response {
    match handlers.pending_handler.handle(&admin).await {
        Ok(list) => (StatusCode::OK, Json(ProposalListResponse::from(list))).into_response(),
        Err(e) => handle_proposal_error(e, Vec::new()),
    }
}

/// POST /api/admin/agreements/verify - Mark accepted proposals as verified
pub async fn verify_agreements(
    State(handlers): State<ProposalHandlers>,
    RequireAdmin(admin): RequireAdmin,
    Json(req): Json<VerifyAgreementsRequest>,
) -> Response {
    let mut proposal_ids = Vec::with_capacity(req.proposal_ids.len());
    for raw in &req.proposal_ids {
        match parse_proposal_id(raw) {
            Ok(id) => proposal_ids.push(id),
            Err(response) => return response,
        }
    }

    let cmd = VerifyAgreementsCommand { proposal_ids };
    match handlers.verify_handler.handle(cmd, &admin).await {
        Ok(result) => {
            (StatusCode::OK, Json(VerifyAgreementsResponse::from(result))).into_response()
        }
        Err(e) => handle_proposal_error(e, Vec::new()),
    }
}

/// GET /health
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn acting_context(user: &AuthenticatedUser, headers: &HeaderMap) -> ActingContext {
    let ctx = ActingContext::new(user.id.clone());
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        Some(request_id) => ctx.with_correlation_id(request_id),
        None => ctx,
    }
}

fn parse_proposal_id(raw: &str) -> Result<ProposalId, Response> {
    raw.parse::<ProposalId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Invalid proposal ID: {}",
                raw
            ))),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Maps a `ProposalError` onto a status code. Notices collected before the
/// failure are returned with it; an illegal transition adds a warning.
fn handle_proposal_error(error: ProposalError, mut notices: Vec<Notice>) -> Response {
    let code = error.code().to_string();
    let message = error.message();

    let status = match &error {
        ProposalError::IllegalTransition(msg) => {
            notices.push(Notice::warning(msg.clone()));
            StatusCode::CONFLICT
        }
        ProposalError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        ProposalError::NotFound(_) => StatusCode::NOT_FOUND,
        ProposalError::Forbidden(_) => StatusCode::FORBIDDEN,
        ProposalError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Proposal request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(code, "Internal server error").with_notices(notices)),
            )
                .into_response();
        }
    };

    (
        status,
        Json(ErrorResponse::new(code, message).with_notices(notices)),
    )
        .into_response()
}
