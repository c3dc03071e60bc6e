//! Challenge-response authentication over Ed25519.
//!
//! A subject proves control of an identity key by signing a server-issued
//! challenge message. Verification is stateless except for replay
//! protection: each accepted message hash is spent forever.
//!
//! ## Components
//! - `message`: `ChallengeMessage` and the identity/nonce/hash newtypes
//! - `canonical`: canonical byte encoding and SHA-256 message hashing
//! - `signature`: Ed25519 envelopes, signing convention, signer recovery
//! - `expiry`: validity windows and the `Clock` abstraction
//! - `registry`: single-use replay protection (`ReplayRegistry`)
//! - `challenge`: server-side challenge issuance
//! - `service`: the `AuthService` pipeline tying the checks together
//! - `error`: rejection and infrastructure error taxonomy

pub mod canonical;
pub mod challenge;
pub mod error;
pub mod expiry;
pub mod message;
pub mod registry;
pub mod service;
pub mod signature;

// Re-export for convenience
pub use challenge::{ChallengeIssuer, DEFAULT_TTL_SECS};
pub use error::{AuthError, InfraError};
pub use expiry::{Clock, ClockError, ManualClock, SystemClock};
pub use message::{ChallengeMessage, Identity, MessageHash, Nonce};
pub use registry::{InMemoryReplayRegistry, RegistryError, ReplayRegistry};
pub use service::{AuthService, AuthServiceBuilder, AuthenticationRecord, DEFAULT_EVENT_CAPACITY};
pub use signature::{
    ENVELOPE_LEN, SIGNING_CONTEXT, SignatureError, generate_keypair, recover_signer,
    sign_challenge,
};
