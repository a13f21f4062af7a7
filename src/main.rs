use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tastelocal_proposals::adapters::auth::JwtSessionValidator;
use tastelocal_proposals::adapters::http::{app_router, ProposalHandlers, ProposalPorts};
use tastelocal_proposals::adapters::notify::{InAppNotifier, LoggingAgreementQueue};
use tastelocal_proposals::adapters::postgres::{PostgresPartyDirectory, PostgresProposalRepository};
use tastelocal_proposals::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    info!("Connecting to database...");
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let directory = Arc::new(PostgresPartyDirectory::new(pool.clone()));
    let notifier = Arc::new(InAppNotifier::new(directory.clone()));
    let handlers = ProposalHandlers::new(ProposalPorts {
        repository: Arc::new(PostgresProposalRepository::new(pool)),
        directory,
        notifier: notifier.clone(),
        inbox: notifier,
        agreements: Arc::new(LoggingAgreementQueue::new()),
    });
    let validator = Arc::new(JwtSessionValidator::from_config(&config.auth));

    let app = app_router(handlers, validator, &config.server);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
