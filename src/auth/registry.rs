//! Replay protection: each message hash is usable exactly once.
//!
//! The registry is the only stateful step of verification. Everything
//! before it (hashing, signature recovery, expiry) is pure, so the
//! single-use guarantee reduces to one atomic claim here: the first
//! caller to consume a hash wins, every later caller loses, and under
//! concurrency the map's entry locking decides the winner.

use dashmap::DashMap;
use thiserror::Error;

use super::message::MessageHash;

/// Registry backend failure. Protocol rejections never come from here;
/// a failed claim attempt is an error, not a "no".
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Backend could not answer. The message's status is unknown and
    /// the caller must not treat the attempt as either fresh or used.
    #[error("replay registry unavailable: {0}")]
    Unavailable(String),
}

/// Store of consumed message hashes.
///
/// `try_consume` is the claim primitive: it must be atomic, so that of
/// any number of concurrent calls for one hash exactly one returns
/// `true`. Implementations answer `Err` when they cannot answer at all,
/// never as a rejection.
pub trait ReplayRegistry: Send + Sync {
    /// Claim `hash`. `Ok(true)` means this call consumed it; `Ok(false)`
    /// means it was already consumed.
    fn try_consume(&self, hash: &MessageHash) -> Result<bool, RegistryError>;

    /// Whether `hash` has been consumed, without claiming it.
    fn is_consumed(&self, hash: &MessageHash) -> Result<bool, RegistryError>;
}

/// In-memory registry over a concurrent map.
///
/// Entries are never evicted: a consumed hash stays consumed for the
/// life of the process. Memory grows with the number of successful
/// authentications, which expiry bounds in practice since a challenge
/// is only signable inside its validity window.
#[derive(Default)]
pub struct InMemoryReplayRegistry {
    consumed: DashMap<MessageHash, ()>,
}

impl InMemoryReplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of consumed hashes.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }

    /// Forget everything. Test harness support; production code has no
    /// business un-consuming a hash.
    pub fn clear(&self) {
        self.consumed.clear();
    }
}

impl ReplayRegistry for InMemoryReplayRegistry {
    fn try_consume(&self, hash: &MessageHash) -> Result<bool, RegistryError> {
        // DashMap::insert returns the previous value under the entry
        // lock, so first-insert-wins is atomic.
        Ok(self.consumed.insert(*hash, ()).is_none())
    }

    fn is_consumed(&self, hash: &MessageHash) -> Result<bool, RegistryError> {
        Ok(self.consumed.contains_key(hash))
    }
}
