//! HTTP adapters - REST API implementations.
//!
//! `api_router` carries the routes plus authentication; `app_router` adds
//! the tower-http layers used when serving for real.

pub mod middleware;
pub mod proposal;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

pub use middleware::{auth_middleware, AuthState};
pub use proposal::{proposal_routes, ErrorResponse, ProposalHandlers, ProposalPorts};

/// Routes with the auth middleware applied, without transport layers.
pub fn api_router(handlers: ProposalHandlers, validator: AuthState) -> Router {
    proposal_routes(handlers)
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
        .route("/health", get(proposal::health))
}

/// Full application router with transport layers.
///
/// Every request gets an `x-request-id` (generated when the client sends
/// none), which handlers use as the correlation id and which is echoed on
/// the response.
pub fn app_router(
    handlers: ProposalHandlers,
    validator: AuthState,
    server: &ServerConfig,
) -> Router {
    api_router(handlers, validator)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::{InMemoryPartyDirectory, InMemoryProposalRepository};
    use crate::adapters::notify::{InAppNotifier, InMemoryAgreementQueue};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn handlers() -> ProposalHandlers {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        let notifier = Arc::new(InAppNotifier::new(directory.clone()));
        ProposalHandlers::new(ProposalPorts {
            repository: Arc::new(InMemoryProposalRepository::new()),
            directory,
            notifier: notifier.clone(),
            inbox: notifier,
            agreements: Arc::new(InMemoryAgreementQueue::new()),
        })
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app_router(
            handlers(),
            Arc::new(MockSessionValidator::new()),
            &ServerConfig::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
