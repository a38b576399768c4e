use serde::{Deserialize, Serialize};

use super::account::AccountRole;

/// Claims embedded in both JWT kinds (access and refresh).
/// The refresh token's `exp` is the source of truth for the persisted
/// `refresh_tokens.expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // account id
    pub role: AccountRole,
    pub iat: usize,
    pub exp: usize,
}

/// Extracted from the validated access token — available via Axum extractors.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub account_id: i32,
    pub role: AccountRole,
}
