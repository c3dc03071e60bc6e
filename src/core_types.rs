//! Core types used throughout the system
//!
//! Semantic aliases shared by the verification core and the gateway.
//! They carry meaning, not behavior. The integer widths are part of the
//! canonical wire encoding and must not change without bumping
//! [`crate::auth::canonical::CANONICAL_VERSION`].

/// Unix timestamp in whole seconds.
///
/// # Trust model:
/// - **Untrusted on messages**: `issued_at` / `expires_at` are client input,
///   used only for comparison
/// - **Trusted from the clock**: verification compares against a server-side
///   time source, never a client-supplied "now"
pub type UnixSeconds = u64;

/// Execution-context identifier a challenge is bound to (chain, realm,
/// deployment tier). Always part of the signed canonical bytes; compared
/// against the verifier's own scope only when scope hardening is enabled.
pub type ScopeId = u64;
