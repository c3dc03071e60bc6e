//! Server-side challenge issuance.
//!
//! Verification does not require that challenges originate here; any
//! message a subject signs can be verified. The issuer exists so the
//! gateway can hand out well-formed challenges with a fresh nonce and a
//! bounded validity window instead of trusting clients to assemble
//! them.

use std::sync::Arc;

use crate::core_types::ScopeId;

use super::expiry::{Clock, ClockError};
use super::message::{ChallengeMessage, Identity, Nonce};

/// Default challenge lifetime in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Stamps out challenges for one protected service.
///
/// Domain, statement, resource, and scope are fixed per issuer; the
/// subject, nonce, and validity window vary per challenge.
pub struct ChallengeIssuer {
    domain: String,
    statement: String,
    resource: String,
    scope_id: ScopeId,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl ChallengeIssuer {
    pub fn new(
        domain: impl Into<String>,
        statement: impl Into<String>,
        resource: impl Into<String>,
        scope_id: ScopeId,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            domain: domain.into(),
            statement: statement.into(),
            resource: resource.into(),
            scope_id,
            ttl_secs: DEFAULT_TTL_SECS,
            clock,
        }
    }

    /// Override the default challenge lifetime.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a challenge for `subject`, valid from now for the
    /// configured lifetime. Each call draws a fresh random nonce, so two
    /// challenges for the same subject never share a hash.
    pub fn issue(&self, subject: Identity) -> Result<ChallengeMessage, ClockError> {
        let now = self.clock.now()?;
        Ok(ChallengeMessage {
            domain: self.domain.clone(),
            subject,
            statement: self.statement.clone(),
            resource: self.resource.clone(),
            scope_id: self.scope_id,
            nonce: Nonce::random(),
            issued_at: now,
            expires_at: now + self.ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::expiry::ManualClock;

    fn issuer_at(now: u64) -> ChallengeIssuer {
        ChallengeIssuer::new(
            "example.com",
            "Sign in to Example",
            "https://example.com/login",
            31337,
            Arc::new(ManualClock::new(now)),
        )
    }

    #[test]
    fn issue_stamps_window_from_clock() {
        let issuer = issuer_at(10_000);
        let subject = Identity::from_bytes([0x42; 32]);

        let msg = issuer.issue(subject).unwrap();
        assert_eq!(msg.issued_at, 10_000);
        assert_eq!(msg.expires_at, 10_000 + DEFAULT_TTL_SECS);
        assert_eq!(msg.subject, subject);
        assert_eq!(msg.domain, "example.com");
        assert_eq!(msg.scope_id, 31337);
    }

    #[test]
    fn with_ttl_overrides_default() {
        let issuer = issuer_at(500).with_ttl(60);
        assert_eq!(issuer.ttl_secs(), 60);

        let msg = issuer.issue(Identity::from_bytes([0x01; 32])).unwrap();
        assert_eq!(msg.expires_at, 560);
    }

    #[test]
    fn nonces_are_fresh_per_challenge() {
        let issuer = issuer_at(1_000);
        let subject = Identity::from_bytes([0x07; 32]);

        let a = issuer.issue(subject).unwrap();
        let b = issuer.issue(subject).unwrap();
        assert_ne!(a.nonce, b.nonce);
    }
}
