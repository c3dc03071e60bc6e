//! Challenge message model and identity types.
//!
//! A [`ChallengeMessage`] is the artifact a client signs to prove key
//! possession. All eight fields take part in the canonical encoding; the
//! verifier never inspects `statement` or `resource` beyond hashing them.

use crate::core_types::{ScopeId, UnixSeconds};

/// A signer identity: the raw bytes of an Ed25519 verifying key.
///
/// The `subject` of a challenge is the identity expected to sign it.
/// Possession of the matching private key is the whole proof; there is no
/// external registry binding identities to accounts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity([u8; 32]);

impl Identity {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from 64 lowercase/uppercase hex characters.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({}..)", &self.to_hex()[..12])
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Per-challenge 32-byte random value.
///
/// Uniqueness is enforced by consumption (the replay registry), not by
/// generation: two challenges that collide on every field including the
/// nonce are the same challenge and only one of them can ever be used.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; 32]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Fresh nonce from the OS entropy source.
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nonce({}..)", &self.to_hex()[..12])
    }
}

/// Fixed-width digest over the canonical encoding of a challenge.
///
/// This is the identity of a message everywhere it matters: the bytes the
/// client signs (after the signing-context prefix) and the key under which
/// the replay registry marks consumption.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHash([u8; 32]);

impl MessageHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for MessageHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageHash({}..)", &self.to_hex()[..12])
    }
}

impl std::fmt::Display for MessageHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The signed artifact of the protocol.
///
/// Field semantics:
/// - `domain`: relying party, e.g. `"example.com"` (not validated here)
/// - `subject`: identity the challenge is issued for; must equal the signer
/// - `statement`: human-readable purpose, opaque to the verifier
/// - `resource`: URI of the relying context, opaque to the verifier
/// - `scope_id`: execution context the challenge is bound to
/// - `nonce`: 32 random bytes, consumed exactly once
/// - `issued_at` / `expires_at`: validity window in Unix seconds; only the
///   upper bound is enforced at verification time
///
/// There is no requirement that `expires_at > issued_at`; a message with an
/// inverted window is simply always expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeMessage {
    pub domain: String,
    pub subject: Identity,
    pub statement: String,
    pub resource: String,
    pub scope_id: ScopeId,
    pub nonce: Nonce,
    pub issued_at: UnixSeconds,
    pub expires_at: UnixSeconds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_hex_round_trip() {
        let id = Identity::from_bytes([0xAB; 32]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Identity::from_hex(&hex).unwrap(), id);
    }

    #[test]
    fn identity_hex_rejects_bad_input() {
        assert!(Identity::from_hex("abcd").is_err());
        assert!(Identity::from_hex(&"a".repeat(70)).is_err());
        assert!(Identity::from_hex(&"g".repeat(64)).is_err());
    }

    #[test]
    fn nonce_random_is_not_constant() {
        // Two OS-random draws colliding would mean a broken entropy source.
        assert_ne!(Nonce::random().as_bytes(), Nonce::random().as_bytes());
    }

    #[test]
    fn message_hash_round_trip() {
        let h = MessageHash::from_bytes([0x5C; 32]);
        assert_eq!(MessageHash::from_hex(&h.to_hex()).unwrap(), h);
    }

    #[test]
    fn debug_forms_are_truncated() {
        let id = Identity::from_bytes([0x11; 32]);
        let shown = format!("{:?}", id);
        assert!(shown.starts_with("Identity(111111111111"));
        assert!(shown.len() < 30);
    }
}
