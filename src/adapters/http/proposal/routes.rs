//! HTTP routes for proposal endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_proposal, drain_notifications, get_proposal, list_pending_agreements, list_proposals,
    respond_to_proposal, verify_agreements, ProposalHandlers,
};

/// Creates the proposal router with all endpoints.
pub fn proposal_routes(handlers: ProposalHandlers) -> Router {
    Router::new()
        .route("/api/proposals", post(create_proposal).get(list_proposals))
        .route("/api/proposals/:id", get(get_proposal))
        .route("/api/proposals/:id/respond", post(respond_to_proposal))
        .route("/api/notifications", get(drain_notifications))
        .route("/api/admin/agreements", get(list_pending_agreements))
        .route("/api/admin/agreements/verify", post(verify_agreements))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::middleware::{auth_middleware, AuthState};
    use crate::adapters::http::proposal::ProposalPorts;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::{InMemoryPartyDirectory, InMemoryProposalRepository};
    use crate::adapters::notify::{InAppNotifier, InMemoryAgreementQueue};
    use crate::domain::foundation::UserId;
    use crate::domain::party::{PartyKind, PartyProfile};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn profile(id: &str, kind: PartyKind) -> PartyProfile {
        PartyProfile {
            user_id: UserId::new(id).unwrap(),
            email: format!("{}@example.com", id),
            first_name: id.to_string(),
            last_name: String::new(),
            kind,
            business_name: None,
        }
    }

    fn app() -> Router {
        let directory = Arc::new(
            InMemoryPartyDirectory::new()
                .with_profile(profile("op-1", PartyKind::TourOperator))
                .with_profile(profile("vendor-1", PartyKind::Vendor)),
        );
        let notifier = Arc::new(InAppNotifier::new(directory.clone()));
        let handlers = ProposalHandlers::new(ProposalPorts {
            repository: Arc::new(InMemoryProposalRepository::new()),
            directory,
            notifier: notifier.clone(),
            inbox: notifier,
            agreements: Arc::new(InMemoryAgreementQueue::new()),
        });
        let validator: AuthState = Arc::new(
            MockSessionValidator::new()
                .with_test_user("op-token", "op-1")
                .with_admin("admin-token", "admin-1"),
        );

        proposal_routes(handlers).layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
    }

    #[tokio::test]
    async fn create_requires_authentication() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/proposals")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"receiver_id":"vendor-1","sender_duties":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_returns_201() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/proposals")
                    .header(header::AUTHORIZATION, "Bearer op-token")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"receiver_id":"vendor-1","sender_duties":"Bring 6 guests"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn invalid_id_in_path_is_400() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/proposals/not-a-uuid")
                    .header(header::AUTHORIZATION, "Bearer op-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_routes_reject_regular_users() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/agreements")
                    .header(header::AUTHORIZATION, "Bearer op-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_sees_empty_pending_list() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/agreements")
                    .header(header::AUTHORIZATION, "Bearer admin-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
