//! Authentication failure taxonomy.
//!
//! Protocol rejections are deliberately few and mutually exclusive: a
//! caller sees exactly one of them per attempt, decided in the fixed
//! pipeline order of [`super::service::AuthService::authenticate`].
//! Infrastructure trouble (clock, registry backend) is a separate class
//! so that "the verifier said no" and "the verifier could not answer"
//! never get conflated.

use thiserror::Error;

use super::expiry::ClockError;
use super::registry::RegistryError;
use crate::core_types::ScopeId;

/// Outcome of a failed authentication attempt.
///
/// The first three variants are the protocol surface; they are terminal
/// for the given `(message, signature)` pair and retrying only makes
/// sense with a freshly issued challenge. `ScopeMismatch` joins them
/// only when the service is configured with an expected scope.
/// `Infrastructure` is the one retriable class: the same pair may be
/// resubmitted once the underlying collaborator recovers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signature malformed, unverifiable, or the recovered signer does
    /// not match the claimed subject. One rejection for all of these:
    /// distinguishing them would tell an attacker which part of a
    /// forgery failed.
    #[error("signature invalid or signer does not match subject")]
    InvalidSignature,

    /// Server time is past the message's declared expiry.
    #[error("message expired")]
    MessageExpired,

    /// The message hash was already consumed by a prior accepting call.
    #[error("message already used")]
    MessageAlreadyUsed,

    /// The challenge is bound to a different execution scope than this
    /// verifier accepts.
    #[error("message bound to scope {actual}, verifier expects {expected}")]
    ScopeMismatch { expected: ScopeId, actual: ScopeId },

    /// A collaborator the verifier depends on failed; no verdict was
    /// reached and nothing was consumed.
    #[error("infrastructure failure: {0}")]
    Infrastructure(#[from] InfraError),
}

/// Non-protocol failure of a verifier dependency.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("clock: {0}")]
    Clock(#[from] ClockError),

    #[error("replay registry: {0}")]
    Registry(#[from] RegistryError),
}

impl From<ClockError> for AuthError {
    fn from(err: ClockError) -> Self {
        Self::Infrastructure(InfraError::Clock(err))
    }
}

impl From<RegistryError> for AuthError {
    fn from(err: RegistryError) -> Self {
        Self::Infrastructure(InfraError::Registry(err))
    }
}

impl AuthError {
    /// Stable numeric code for API envelopes and logs.
    ///
    /// 2xxx = authentication rejections, 5xxx = server-side failure,
    /// matching the gateway's error-code families.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidSignature => 2101,
            Self::MessageExpired => 2102,
            Self::MessageAlreadyUsed => 2103,
            Self::ScopeMismatch { .. } => 2104,
            Self::Infrastructure(_) => 5000,
        }
    }

    /// Stable name string for structured logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::MessageExpired => "MESSAGE_EXPIRED",
            Self::MessageAlreadyUsed => "MESSAGE_ALREADY_USED",
            Self::ScopeMismatch { .. } => "SCOPE_MISMATCH",
            Self::Infrastructure(_) => "INFRASTRUCTURE_FAILURE",
        }
    }

    /// True for protocol rejections, false for infrastructure trouble.
    ///
    /// Protocol rejections are final for the submitted pair; an
    /// infrastructure failure means the attempt never reached a verdict.
    pub fn is_protocol_rejection(&self) -> bool {
        !matches!(self, Self::Infrastructure(_))
    }
}
