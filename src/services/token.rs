use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::{account::AccountRole, auth::TokenClaims};

type TokenResult<T> = Result<T, jsonwebtoken::errors::Error>;

/// Sign a short-lived access token.
pub fn sign_access_token(
    account_id: i32,
    role: AccountRole,
    secret: &str,
    ttl_seconds: u64,
) -> TokenResult<String> {
    let now = Utc::now().timestamp() as usize;
    let claims = TokenClaims {
        sub: account_id.to_string(),
        role,
        iat: now,
        exp: now + ttl_seconds as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Sign a refresh token. `exp_override` pins the expiry to an earlier
/// token's; rotation uses it so a rotated session never gets longer.
pub fn sign_refresh_token(
    account_id: i32,
    role: AccountRole,
    secret: &str,
    ttl_days: u64,
    exp_override: Option<usize>,
) -> TokenResult<String> {
    let now = Utc::now().timestamp() as usize;
    let exp = exp_override.unwrap_or(now + (ttl_days * 86400) as usize);
    let claims = TokenClaims {
        sub: account_id.to_string(),
        role,
        iat: now,
        exp,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> TokenResult<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn access_token_round_trip() {
        let token = sign_access_token(7, AccountRole::Owner, SECRET, 900).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, AccountRole::Owner);
        assert_eq!(claims.exp, claims.iat + 900);
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = sign_access_token(7, AccountRole::Employee, SECRET, 900).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn garbled_token_fails_verification() {
        assert!(verify_token("not.a.jwt", SECRET).is_err());
    }

    #[test]
    fn refresh_override_preserves_expiry() {
        let first = sign_refresh_token(3, AccountRole::Employee, SECRET, 30, None).unwrap();
        let original_exp = verify_token(&first, SECRET).unwrap().exp;

        let rotated =
            sign_refresh_token(3, AccountRole::Employee, SECRET, 30, Some(original_exp)).unwrap();
        let rotated_claims = verify_token(&rotated, SECRET).unwrap();
        assert_eq!(rotated_claims.exp, original_exp);
        assert_eq!(rotated_claims.sub, "3");
    }

    #[test]
    fn expired_token_fails_verification() {
        let past = (Utc::now().timestamp() - 3600) as usize;
        let token = sign_refresh_token(3, AccountRole::Employee, SECRET, 30, Some(past)).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }
}
