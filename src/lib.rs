//! challenge_gate - Challenge-Response Authentication Engine
//!
//! Prove control of an Ed25519 key by signing a server-issued,
//! time-bounded, single-use challenge message.
//!
//! # Modules
//!
//! - [`core_types`] - Scalar type aliases (UnixSeconds, ScopeId)
//! - [`auth`] - The engine: messages, canonical hashing, signatures,
//!   expiry, replay protection, issuance, and the verification service
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup
//! - [`gateway`] - Axum HTTP surface over the engine
//!
//! # Flow
//!
//! ```text
//! ┌────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐
//! │ Issuer │───▶│  Client  │───▶│ Verify  │───▶│  Record  │
//! │(+nonce)│    │ (signs)  │    │(5 gates)│    │ (+event) │
//! └────────┘    └──────────┘    └─────────┘    └──────────┘
//! ```

// Core types - must be first!
pub mod core_types;

// The authentication engine
pub mod auth;

// Application plumbing
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use auth::canonical::{canonicalize, hash as compute_hash};
pub use auth::{
    AuthError, AuthService, AuthServiceBuilder, AuthenticationRecord, ChallengeIssuer,
    ChallengeMessage, Clock, Identity, InMemoryReplayRegistry, ManualClock, MessageHash, Nonce,
    ReplayRegistry, SystemClock, generate_keypair, recover_signer, sign_challenge,
};
pub use core_types::{ScopeId, UnixSeconds};
