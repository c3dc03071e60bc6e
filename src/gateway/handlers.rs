//! HTTP handlers for the auth endpoints.
//!
//! Handlers translate between wire DTOs and the core types, then
//! delegate: issuance to the [`ChallengeIssuer`], hashing and
//! verification to the [`AuthService`]. No auth decision is made here.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::auth::{AuthError, Identity};

use super::error::ApiError;
use super::state::AppState;
use super::types::message::MessageParseError;
use super::types::{
    ApiResponse, AuthResponseData, AuthenticateRequest, ChallengeMessageDto, ChallengeRequest,
    ChallengeResponseData, HashRequest, HashResponseData, decode_signature,
};

/// Health check response data
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    pub timestamp_ms: u64,
}

/// GET /api/v1/health
///
/// Liveness only; the verifier has no backends worth probing beyond
/// process health.
pub async fn health_check() -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    (
        StatusCode::OK,
        Json(ApiResponse::success(HealthResponse { timestamp_ms })),
    )
}

/// POST /api/v1/auth/challenge
///
/// Issue a fresh challenge for the submitted subject. The response
/// carries the message, its canonical hash, and the signing context so
/// the client can cross-check its own encoding before signing.
pub async fn issue_challenge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChallengeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChallengeResponseData>>), ApiError> {
    let subject = Identity::from_hex(&req.subject).map_err(|_| MessageParseError::BadSubject)?;

    let message = state.issuer.issue(subject).map_err(AuthError::from)?;
    let hash = state.auth_service.compute_hash(&message);

    let data = ChallengeResponseData::new(ChallengeMessageDto::from(&message), hash.to_hex());
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// POST /api/v1/auth/hash
///
/// Canonical hash of a client-assembled message. Pure helper: nothing
/// is issued, verified, or consumed.
pub async fn compute_hash(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HashRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HashResponseData>>), ApiError> {
    let message = req.message.parse()?;
    let hash = state.auth_service.compute_hash(&message);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(HashResponseData {
            message_hash: hash.to_hex(),
        })),
    ))
}

/// POST /api/v1/auth/authenticate
///
/// The verification endpoint. Success consumes the message hash; the
/// mapped failure statuses are 401 (rejected), 409 (already used), and
/// 500 (verifier unavailable).
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AuthenticateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseData>>), ApiError> {
    let message = req.message.parse()?;
    let envelope = decode_signature(&req.signature)?;

    let record = state
        .auth_service
        .authenticate(&message, &envelope)
        .map_err(|err| {
            info!(
                code = err.code(),
                name = err.name(),
                subject = %message.subject,
                "authentication rejected"
            );
            ApiError::from(err)
        })?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(AuthResponseData::from(record))),
    ))
}
