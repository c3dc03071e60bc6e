//! The verification pipeline: one entry point, fixed check order.
//!
//! `authenticate` runs hash, signature, scope, expiry, and replay
//! checks in that order and stops at the first failure. The order is
//! part of the contract: callers and tests may rely on a message with
//! several defects reporting the earliest one. Time is read once per
//! attempt; the same instant judges expiry and stamps the record.
//!
//! The service owns no keys and stores no messages. Its only state is
//! the injected replay registry, and `try_consume` is the only mutation
//! on the entire path.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use crate::core_types::{ScopeId, UnixSeconds};

use super::canonical;
use super::error::AuthError;
use super::expiry::{self, Clock, SystemClock};
use super::message::{ChallengeMessage, Identity, MessageHash};
use super::registry::{InMemoryReplayRegistry, ReplayRegistry};
use super::signature;

/// Default capacity of the success-event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Proof that one authentication attempt succeeded.
///
/// `accepted_at` is the same clock reading that passed the expiry
/// check, so a record never claims acceptance at an instant the message
/// was not valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationRecord {
    pub subject: Identity,
    pub message_hash: MessageHash,
    pub accepted_at: UnixSeconds,
}

/// Challenge-response verifier.
///
/// Send + Sync; share one instance behind an `Arc` across however many
/// tasks are verifying. Replay atomicity is the registry's problem, not
/// the caller's.
pub struct AuthService {
    registry: Arc<dyn ReplayRegistry>,
    clock: Arc<dyn Clock>,
    expected_scope: Option<ScopeId>,
    events: broadcast::Sender<AuthenticationRecord>,
}

impl AuthService {
    pub fn builder() -> AuthServiceBuilder {
        AuthServiceBuilder::default()
    }

    /// The canonical hash a signer must commit to for `message`.
    pub fn compute_hash(&self, message: &ChallengeMessage) -> MessageHash {
        canonical::hash(message)
    }

    /// Subscribe to successful authentications.
    ///
    /// The channel is lossy: a subscriber that falls behind misses old
    /// records, it never stalls verification.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthenticationRecord> {
        self.events.subscribe()
    }

    /// Verify a signed challenge and consume it.
    ///
    /// On success the message's hash is permanently spent; replaying the
    /// same message and envelope, or any envelope over the same message,
    /// fails with [`AuthError::MessageAlreadyUsed`].
    pub fn authenticate(
        &self,
        message: &ChallengeMessage,
        envelope: &[u8],
    ) -> Result<AuthenticationRecord, AuthError> {
        // Step 1: canonical hash. Everything downstream commits to these
        // exact bytes.
        let hash = canonical::hash(message);

        // Step 2: recover the signer and pin it to the claimed subject.
        // Every signature defect collapses into one rejection.
        let signer =
            signature::recover_signer(&hash, envelope).map_err(|_| AuthError::InvalidSignature)?;
        if signer != message.subject {
            return Err(AuthError::InvalidSignature);
        }

        // Step 3: scope binding, when configured.
        if let Some(expected) = self.expected_scope {
            if message.scope_id != expected {
                return Err(AuthError::ScopeMismatch {
                    expected,
                    actual: message.scope_id,
                });
            }
        }

        // Step 4: one clock read serves both the expiry check and the
        // record timestamp.
        let now = self.clock.now()?;
        if !expiry::is_valid(message, now) {
            return Err(AuthError::MessageExpired);
        }

        // Step 5: atomic claim. Losing it means the hash was already
        // spent, possibly by a concurrent attempt a microsecond ago.
        if !self.registry.try_consume(&hash)? {
            return Err(AuthError::MessageAlreadyUsed);
        }

        let record = AuthenticationRecord {
            subject: message.subject,
            message_hash: hash,
            accepted_at: now,
        };
        debug!(
            subject = %record.subject,
            message_hash = %record.message_hash,
            accepted_at = record.accepted_at,
            "authentication accepted"
        );
        // No subscribers is fine; the record still stands.
        let _ = self.events.send(record);
        Ok(record)
    }
}

/// Assembles an [`AuthService`]. Every knob has a production default:
/// in-memory registry, system clock, scope checking off.
#[derive(Default)]
pub struct AuthServiceBuilder {
    registry: Option<Arc<dyn ReplayRegistry>>,
    clock: Option<Arc<dyn Clock>>,
    expected_scope: Option<ScopeId>,
    event_capacity: Option<usize>,
}

impl AuthServiceBuilder {
    pub fn registry(mut self, registry: Arc<dyn ReplayRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// `Some(scope)` enforces scope binding; `None` (the default) skips
    /// the check entirely.
    pub fn expected_scope(mut self, scope: Option<ScopeId>) -> Self {
        self.expected_scope = scope;
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    pub fn build(self) -> AuthService {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(InMemoryReplayRegistry::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let capacity = self.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY).max(1);
        let (events, _) = broadcast::channel(capacity);
        AuthService {
            registry,
            clock,
            expected_scope: self.expected_scope,
            events,
        }
    }
}
