//! challenge_gate - Challenge-Response Authentication Gateway
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Issuer  │───▶│ Verifier │───▶│ Gateway  │
//! │  (YAML)  │    │ (nonce+  │    │ (5-gate  │    │ (axum +  │
//! │          │    │  window) │    │ pipeline)│    │  audit)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! The verifier holds the only mutable state (the replay registry);
//! gateway tasks share it behind an `Arc`.

use std::sync::Arc;

use anyhow::{Context, Result};

use challenge_gate::auth::{AuthService, ChallengeIssuer, InMemoryReplayRegistry, SystemClock};
use challenge_gate::config::AppConfig;
use challenge_gate::logging::init_logging;

// ============================================================
// CLI ARGUMENTS
// ============================================================

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

// ============================================================
// MAIN
// ============================================================

fn main() -> Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;
    let _log_guard = init_logging(&config.log);

    tracing::info!("Starting challenge_gate in {} mode", env);

    println!("=== challenge_gate: Challenge-Response Auth Gateway ===");
    println!("Build: {}", env!("GIT_HASH"));

    let port = get_port_override().unwrap_or(config.gateway.port);

    // Wire the verifier and the challenge mint
    let auth_cfg = &config.auth;
    let clock = Arc::new(SystemClock);
    let registry = Arc::new(InMemoryReplayRegistry::new());
    let expected_scope = auth_cfg.enforce_scope.then_some(auth_cfg.scope_id);

    let service = AuthService::builder()
        .registry(registry)
        .clock(clock.clone())
        .expected_scope(expected_scope)
        .event_capacity(auth_cfg.event_capacity)
        .build();

    let issuer = ChallengeIssuer::new(
        auth_cfg.domain.clone(),
        auth_cfg.statement.clone(),
        auth_cfg.resource.clone(),
        auth_cfg.scope_id,
        clock,
    )
    .with_ttl(auth_cfg.challenge_ttl_secs);

    println!(
        "Domain: {} | scope: {} | challenge TTL: {}s",
        auth_cfg.domain, auth_cfg.scope_id, auth_cfg.challenge_ttl_secs
    );
    if expected_scope.is_some() {
        println!("🔒 Scope enforcement ON");
    }
    println!("Gateway will listen on {}:{}", config.gateway.host, port);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(challenge_gate::gateway::run_server(
        &config.gateway.host,
        port,
        Arc::new(service),
        Arc::new(issuer),
    ));

    Ok(())
}
