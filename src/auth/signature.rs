//! Ed25519 signature envelopes over challenge hashes.
//!
//! Ed25519 cannot recover a public key from a signature alone, so the
//! envelope carries the signer's verifying key next to the signature.
//! "Recovery" parses the embedded key, verifies the signature over the
//! context-prefixed hash, and returns the key as the signer identity;
//! the caller compares it against the claimed subject.
//!
//! # Signing convention
//!
//! Signatures are never made over the raw 32-byte message hash. The
//! signed payload is [`SIGNING_CONTEXT`] followed by the hash, and
//! exactly one function ([`signing_payload`]) builds it; both
//! [`sign_challenge`] and [`recover_signer`] go through it. A client
//! that signs the bare hash, or prefixes anything else, produces
//! envelopes that are indistinguishable from forgeries.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use thiserror::Error;

use super::message::{Identity, MessageHash};

/// Domain-separation prefix applied before signing a challenge hash.
///
/// Version-tagged: changing it is a protocol break and must come with a
/// new tag, never an in-place edit.
pub const SIGNING_CONTEXT: &[u8] = b"challenge-gate/v1 signed challenge:";

/// Envelope layout: 64-byte Ed25519 signature, then the signer's
/// 32-byte verifying key.
pub const ENVELOPE_LEN: usize = 96;

/// Why an envelope failed to yield a signer.
///
/// Callers enforcing the protocol surface collapse every variant into
/// one invalid-signature rejection; the distinctions exist for logs and
/// tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Envelope is not exactly signature + key.
    #[error("envelope must be {ENVELOPE_LEN} bytes, got {0}")]
    BadLength(usize),

    /// Embedded verifying key is not a valid Ed25519 point.
    #[error("embedded verifying key is not a valid Ed25519 point")]
    BadKey,

    /// Signature does not verify over the context-prefixed hash.
    #[error("signature does not verify over the prefixed hash")]
    BadSignature,
}

/// The exact byte sequence a signer commits to for `hash`.
pub fn signing_payload(hash: &MessageHash) -> Vec<u8> {
    let mut payload = Vec::with_capacity(SIGNING_CONTEXT.len() + 32);
    payload.extend_from_slice(SIGNING_CONTEXT);
    payload.extend_from_slice(hash.as_bytes());
    payload
}

/// Sign a challenge hash, producing the 96-byte envelope.
///
/// Part of the public API, not test-only: clients must apply the exact
/// same byte transform the verifier checks.
pub fn sign_challenge(signing_key: &SigningKey, hash: &MessageHash) -> Vec<u8> {
    let signature = signing_key.sign(&signing_payload(hash));
    let mut envelope = Vec::with_capacity(ENVELOPE_LEN);
    envelope.extend_from_slice(&signature.to_bytes());
    envelope.extend_from_slice(signing_key.verifying_key().as_bytes());
    envelope
}

/// Recover the signer identity from an envelope over `hash`.
///
/// Pure: no state is consulted or mutated. A returned identity proves
/// only that its holder signed this hash under the documented
/// convention; whether that identity is the expected one is the
/// caller's comparison to make.
pub fn recover_signer(hash: &MessageHash, envelope: &[u8]) -> Result<Identity, SignatureError> {
    if envelope.len() != ENVELOPE_LEN {
        return Err(SignatureError::BadLength(envelope.len()));
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&envelope[..64]);
    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&envelope[64..]);

    let verifying_key = match VerifyingKey::from_bytes(&key_bytes) {
        Ok(k) => k,
        Err(_) => return Err(SignatureError::BadKey),
    };
    let signature = Signature::from_bytes(&sig_bytes);

    verifying_key
        .verify(&signing_payload(hash), &signature)
        .map_err(|_| SignatureError::BadSignature)?;

    Ok(Identity::from_bytes(key_bytes))
}

/// Generate a fresh Ed25519 keypair.
///
/// Key custody is out of scope for the verifier; this exists for
/// clients, demos, and tests. Returns the signing key and the identity
/// derived from its verifying key.
pub fn generate_keypair() -> (SigningKey, Identity) {
    use rand::rngs::OsRng;

    let signing_key = SigningKey::generate(&mut OsRng);
    let identity = Identity::from_bytes(signing_key.verifying_key().to_bytes());
    (signing_key, identity)
}
