//! Canonical byte encoding and digest of challenge messages.
//!
//! The whole protocol stands on one invariant: signer and verifier must
//! produce bit-identical bytes for the same message. Any divergence does
//! not fail loudly, it yields a system where no signature ever verifies.
//! For that reason there is exactly one encoder, it lives here, and both
//! sides of the protocol call it (clients via [`hash`], re-exported at the
//! crate root and served by the gateway's `/auth/hash` endpoint).
//!
//! Layout (version `0x01`):
//!
//! ```text
//! version:    u8            = 0x01
//! domain:     u32 BE length prefix + UTF-8 bytes
//! subject:    32 raw bytes (Ed25519 verifying key)
//! statement:  u32 BE length prefix + UTF-8 bytes
//! resource:   u32 BE length prefix + UTF-8 bytes
//! scope_id:   u64 BE
//! nonce:      32 raw bytes
//! issued_at:  u64 BE
//! expires_at: u64 BE
//! ```
//!
//! Field order is fixed and load-bearing. Variable-length fields are length
//! prefixed so no pair of distinct messages can collide on concatenation.

use sha2::{Digest, Sha256};

use super::message::{ChallengeMessage, MessageHash};

/// Format version of the canonical layout, emitted as the first byte.
pub const CANONICAL_VERSION: u8 = 0x01;

fn put_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u32).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

/// Serialize a message into its canonical byte form.
///
/// Infallible: the type system already guarantees all eight fields are
/// present and within width.
pub fn canonicalize(message: &ChallengeMessage) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        1 + 3 * 4
            + message.domain.len()
            + message.statement.len()
            + message.resource.len()
            + 32 * 2
            + 8 * 3,
    );
    out.push(CANONICAL_VERSION);
    put_str(&mut out, &message.domain);
    out.extend_from_slice(message.subject.as_bytes());
    put_str(&mut out, &message.statement);
    put_str(&mut out, &message.resource);
    out.extend_from_slice(&message.scope_id.to_be_bytes());
    out.extend_from_slice(message.nonce.as_bytes());
    out.extend_from_slice(&message.issued_at.to_be_bytes());
    out.extend_from_slice(&message.expires_at.to_be_bytes());
    out
}

/// SHA-256 digest over the canonical bytes.
///
/// This hash is the message's identity: the value signed over (behind the
/// signing-context prefix) and the key consumed in the replay registry.
pub fn hash(message: &ChallengeMessage) -> MessageHash {
    let digest = Sha256::digest(canonicalize(message));
    MessageHash::from_bytes(digest.into())
}
