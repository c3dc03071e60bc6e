//! Gateway types module
//!
//! Type-safe boundary between HTTP and the auth core:
//!
//! ## Input Types
//! - [`ChallengeMessageDto`]: hex-encoded wire form of a challenge
//! - [`ChallengeRequest`] / [`HashRequest`] / [`AuthenticateRequest`]
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ChallengeResponseData`] / [`HashResponseData`] / [`AuthResponseData`]
//!
//! ## Submodules
//! - [`message`]: wire codecs and request DTOs
//! - [`response`]: response envelope, DTOs, and error codes

pub mod message;
pub mod response;

// Re-export commonly used types at module root
pub use message::{
    AuthenticateRequest, ChallengeMessageDto, ChallengeRequest, HashRequest, MessageParseError,
    decode_signature, encode_signature,
};
pub use response::{
    ApiResponse, AuthResponseData, ChallengeResponseData, HashResponseData, error_codes,
};
