//! Challenge message wire format and request DTOs.
//!
//! The core types carry raw 32-byte values; over HTTP those travel as
//! hex strings and signature envelopes as base64. This module is the
//! only place that conversion happens. Parsing is total: a DTO either
//! becomes a well-formed [`ChallengeMessage`] or a 400-class error, so
//! the verification pipeline never sees malformed input.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{ChallengeMessage, Identity, Nonce};
use crate::core_types::{ScopeId, UnixSeconds};

/// Why a submitted message or envelope failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageParseError {
    #[error("subject must be 64 hex characters (32-byte verifying key)")]
    BadSubject,
    #[error("nonce must be 64 hex characters (32 bytes)")]
    BadNonce,
    #[error("signature must be valid base64")]
    BadSignatureEncoding,
}

/// Wire form of a [`ChallengeMessage`]: binary fields hex-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeMessageDto {
    pub domain: String,
    /// Hex verifying key of the expected signer.
    pub subject: String,
    pub statement: String,
    pub resource: String,
    pub scope_id: ScopeId,
    /// Hex, 32 bytes.
    pub nonce: String,
    pub issued_at: UnixSeconds,
    pub expires_at: UnixSeconds,
}

impl ChallengeMessageDto {
    /// Parse into the core message type.
    pub fn parse(&self) -> Result<ChallengeMessage, MessageParseError> {
        let subject =
            Identity::from_hex(&self.subject).map_err(|_| MessageParseError::BadSubject)?;
        let nonce = Nonce::from_hex(&self.nonce).map_err(|_| MessageParseError::BadNonce)?;
        Ok(ChallengeMessage {
            domain: self.domain.clone(),
            subject,
            statement: self.statement.clone(),
            resource: self.resource.clone(),
            scope_id: self.scope_id,
            nonce,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        })
    }
}

impl From<&ChallengeMessage> for ChallengeMessageDto {
    fn from(message: &ChallengeMessage) -> Self {
        Self {
            domain: message.domain.clone(),
            subject: message.subject.to_hex(),
            statement: message.statement.clone(),
            resource: message.resource.clone(),
            scope_id: message.scope_id,
            nonce: message.nonce.to_hex(),
            issued_at: message.issued_at,
            expires_at: message.expires_at,
        }
    }
}

/// Decode a base64 signature envelope.
///
/// Length is not checked here; the verifier rejects wrong-sized
/// envelopes as invalid signatures, which is the protocol answer rather
/// than a parse answer.
pub fn decode_signature(encoded: &str) -> Result<Vec<u8>, MessageParseError> {
    BASE64
        .decode(encoded)
        .map_err(|_| MessageParseError::BadSignatureEncoding)
}

/// Encode a signature envelope for transport.
pub fn encode_signature(envelope: &[u8]) -> String {
    BASE64.encode(envelope)
}

// ============================================================================
// Request DTOs
// ============================================================================

/// POST /api/v1/auth/challenge
#[derive(Debug, Deserialize)]
pub struct ChallengeRequest {
    /// Hex verifying key the challenge is issued for.
    pub subject: String,
}

/// POST /api/v1/auth/hash
#[derive(Debug, Deserialize)]
pub struct HashRequest {
    pub message: ChallengeMessageDto,
}

/// POST /api/v1/auth/authenticate
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub message: ChallengeMessageDto,
    /// Base64 signature envelope (64-byte signature || 32-byte key).
    pub signature: String,
}
