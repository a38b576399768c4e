use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::models::auth::AuthenticatedUser;
use crate::services::token;

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid Authorization header format"))?;

        let secret = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "JWT secret not configured"))?;

        decode_access_token(token, &secret.0)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_access_token(token: &str, secret: &str) -> Result<AuthenticatedUser, anyhow::Error> {
    let claims = token::verify_token(token, secret)?;
    Ok(AuthenticatedUser {
        account_id: claims.sub.parse()?,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountRole;

    #[test]
    fn decodes_a_signed_access_token() {
        let token = token::sign_access_token(42, AccountRole::Owner, "secret", 900).unwrap();
        let user = decode_access_token(&token, "secret").unwrap();
        assert_eq!(user.account_id, 42);
        assert_eq!(user.role, AccountRole::Owner);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = token::sign_access_token(42, AccountRole::Owner, "secret", 900).unwrap();
        assert!(decode_access_token(&token, "not-the-secret").is_err());
    }
}
