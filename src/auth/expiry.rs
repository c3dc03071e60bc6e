//! Challenge validity windows and the clock they are judged against.
//!
//! Time enters verification in exactly one place: a single `now` is
//! read per attempt and compared against the message's upper bound.
//! Only `expires_at` is enforced. A not-yet-reached `issued_at` does
//! not invalidate a message; clients with skewed clocks routinely
//! present windows that start slightly in the future.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::core_types::UnixSeconds;

use super::message::ChallengeMessage;

/// Clock read failure.
#[derive(Debug, Error)]
pub enum ClockError {
    /// System time reads before the Unix epoch. Indicates a host
    /// misconfiguration; verification cannot proceed without a usable
    /// timestamp.
    #[error("system clock reads before the Unix epoch")]
    BeforeEpoch,
}

/// Source of the current time for verification and issuance.
///
/// Abstracted so tests can pin or step time; production wires in
/// [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<UnixSeconds, ClockError>;
}

/// Wall clock in whole seconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<UnixSeconds, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| ClockError::BeforeEpoch)
    }
}

/// Settable clock for tests. Starts at the given instant and only moves
/// when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(now: UnixSeconds) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn set(&self, now: UnixSeconds) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<UnixSeconds, ClockError> {
        Ok(self.now.load(Ordering::SeqCst))
    }
}

/// Whether `message` is still inside its validity window at `now`.
///
/// The boundary instant counts: a message expiring at exactly `now` is
/// valid. Expiry begins one second later.
pub fn is_valid(message: &ChallengeMessage, now: UnixSeconds) -> bool {
    now <= message.expires_at
}
