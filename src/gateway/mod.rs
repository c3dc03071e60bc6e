//! HTTP gateway for the challenge-response verifier.
//!
//! Routes, DTO translation, and status mapping live here; every auth
//! decision happens in [`crate::auth`].

pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::auth::{AuthService, ChallengeIssuer};
use state::AppState;

/// Assemble the route tree over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/challenge", post(handlers::issue_challenge))
        .route("/hash", post(handlers::compute_hash))
        .route("/authenticate", post(handlers::authenticate));

    Router::new()
        // Health check
        .route("/api/v1/health", get(handlers::health_check))
        // Challenge-response API
        .nest("/api/v1/auth", auth_routes)
        .with_state(state)
}

/// Start HTTP gateway server
pub async fn run_server(
    host: &str,
    port: u16,
    auth_service: Arc<AuthService>,
    issuer: Arc<ChallengeIssuer>,
) {
    // Audit subscriber: every accepted authentication lands in the log
    // whether or not any external observer is listening.
    let mut events = auth_service.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(record) => info!(
                    target: "audit",
                    subject = %record.subject,
                    message_hash = %record.message_hash,
                    accepted_at = record.accepted_at,
                    "authentication accepted"
                ),
                Err(RecvError::Lagged(missed)) => {
                    warn!(target: "audit", missed, "audit subscriber lagged")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
    println!("📝 Audit subscriber started");

    let state = Arc::new(AppState::new(auth_service, issuer));
    let app = build_router(state);

    // Bind address
    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                port, port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("🔑 Challenge API: POST /api/v1/auth/{{challenge,hash,authenticate}}");

    // Start server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
