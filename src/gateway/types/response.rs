//! API response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - Response DTOs for the auth endpoints

use serde::Serialize;

use crate::auth::{AuthenticationRecord, SIGNING_CONTEXT};

use super::message::ChallengeMessageDto;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    pub code: i32,
    /// Response message
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Issued challenge, ready for the client to hash and sign.
///
/// `message_hash` and `signing_context` are included so a client can
/// verify its own canonicalization before signing: hash the message
/// locally, compare, then sign `signing_context || hash`.
#[derive(Debug, Serialize)]
pub struct ChallengeResponseData {
    pub message: ChallengeMessageDto,
    /// Canonical SHA-256 hash of `message`, hex.
    pub message_hash: String,
    /// Prefix the signature must cover, UTF-8.
    pub signing_context: String,
}

impl ChallengeResponseData {
    pub fn new(message: ChallengeMessageDto, message_hash: String) -> Self {
        Self {
            message,
            message_hash,
            signing_context: String::from_utf8_lossy(SIGNING_CONTEXT).into_owned(),
        }
    }
}

/// Canonical hash of a client-submitted message.
#[derive(Debug, Serialize)]
pub struct HashResponseData {
    /// Hex SHA-256 over the canonical encoding.
    pub message_hash: String,
}

/// Accepted authentication.
#[derive(Debug, Serialize)]
pub struct AuthResponseData {
    /// Authenticated identity, hex verifying key.
    pub subject: String,
    /// Consumed message hash, hex.
    pub message_hash: String,
    /// Unix seconds at acceptance.
    pub accepted_at: u64,
}

impl From<AuthenticationRecord> for AuthResponseData {
    fn from(record: AuthenticationRecord) -> Self {
        Self {
            subject: record.subject.to_hex(),
            message_hash: record.message_hash.to_hex(),
            accepted_at: record.accepted_at,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}
