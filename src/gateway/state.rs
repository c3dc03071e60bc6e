use std::sync::Arc;

use crate::auth::{AuthService, ChallengeIssuer};

/// Shared gateway state.
#[derive(Clone)]
pub struct AppState {
    /// Verification pipeline (holds the replay registry and clock)
    pub auth_service: Arc<AuthService>,
    /// Challenge mint for this deployment
    pub issuer: Arc<ChallengeIssuer>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, issuer: Arc<ChallengeIssuer>) -> Self {
        Self {
            auth_service,
            issuer,
        }
    }
}
