use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::account::{
        Account, AccountSummary, GoogleLoginResponse, LoginResponse, TokenPairResponse,
    },
    services::{google::GoogleOauthClient, token},
};

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password, avatar, role, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    /// Password login: issue an access/refresh pair and persist the
    /// refresh token with the expiry taken from its own signed payload.
    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> Result<LoginResponse, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::entity("email", "Email does not exist"))?;

        // Generic message on mismatch so callers cannot probe which field failed.
        let matches = bcrypt::verify(password, &account.password)
            .map_err(|_| AppError::entity("password", "Email or password is incorrect"))?;
        if !matches {
            return Err(AppError::entity("password", "Email or password is incorrect"));
        }

        let role = account.role();
        let access_token = token::sign_access_token(account.id, role, jwt_secret, access_ttl)?;
        let refresh_token =
            token::sign_refresh_token(account.id, role, refresh_secret, refresh_ttl_days, None)?;

        // The token's own signed exp is the source of truth for the stored row.
        let claims = token::verify_token(&refresh_token, refresh_secret)?;
        let expires_at = DateTime::from_timestamp(claims.exp as i64, 0)
            .ok_or_else(|| AppError::Auth("refresh token expiry out of range".into()))?;

        sqlx::query(
            "INSERT INTO refresh_tokens (token, account_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&refresh_token)
        .bind(account.id)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(LoginResponse {
            account,
            access_token,
            refresh_token,
        })
    }

    /// Delete the stored refresh token. Logging out an unknown token is
    /// reported as not-found rather than silently ignored.
    pub async fn logout(pool: &PgPool, refresh_token: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(refresh_token)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("refresh token not found".into()));
        }
        Ok(())
    }

    /// Rotate a refresh token: the presented token is replaced by a new
    /// pair carrying the original expiry, so rotation never extends the
    /// session. Delete and insert run in one transaction; the conditional
    /// delete makes concurrent rotations of the same token lose cleanly.
    pub async fn refresh(
        pool: &PgPool,
        refresh_token: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> Result<TokenPairResponse, AppError> {
        let claims = token::verify_token(refresh_token, refresh_secret)
            .map_err(|_| AppError::Auth("invalid refresh token".into()))?;

        let mut tx = pool.begin().await?;

        let old: Option<(i32, DateTime<Utc>)> = sqlx::query_as(
            "DELETE FROM refresh_tokens WHERE token = $1 RETURNING account_id, expires_at",
        )
        .bind(refresh_token)
        .fetch_optional(&mut *tx)
        .await?;
        let (account_id, expires_at) =
            old.ok_or_else(|| AppError::NotFound("refresh token not found".into()))?;

        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(account_id)
        .fetch_one(&mut *tx)
        .await?;

        let role = account.role();
        let access_token = token::sign_access_token(account.id, role, jwt_secret, access_ttl)?;
        let new_refresh_token = token::sign_refresh_token(
            account.id,
            role,
            refresh_secret,
            refresh_ttl_days,
            Some(claims.exp),
        )?;

        // The replacement row keeps the replaced row's expires_at.
        sqlx::query(
            "INSERT INTO refresh_tokens (token, account_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&new_refresh_token)
        .bind(account_id)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TokenPairResponse {
            access_token,
            refresh_token: new_refresh_token,
        })
    }

    /// Federated login: exchange the authorization code, trust only a
    /// verified email, and bind it to a pre-existing account. Accounts
    /// are never auto-provisioned here.
    pub async fn login_with_google(
        pool: &PgPool,
        google: &GoogleOauthClient,
        code: &str,
        jwt_secret: &str,
        refresh_secret: &str,
        access_ttl: u64,
        refresh_ttl_days: u64,
    ) -> Result<GoogleLoginResponse, AppError> {
        let tokens = google.exchange_code(code).await?;
        let profile = google.fetch_profile(&tokens).await?;

        if !profile.verified_email {
            return Err(AppError::Forbidden("Google email is not verified".into()));
        }

        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(&profile.email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::Forbidden("This account does not exist on this system".into())
        })?;

        let role = account.role();
        let access_token = token::sign_access_token(account.id, role, jwt_secret, access_ttl)?;
        let refresh_token =
            token::sign_refresh_token(account.id, role, refresh_secret, refresh_ttl_days, None)?;

        // No refresh_tokens row is stored for federated logins.
        // TODO: decide whether Google logins should persist the refresh
        // token like password login does; until then these tokens cannot
        // be rotated or revoked.

        Ok(GoogleLoginResponse {
            access_token,
            refresh_token,
            account: AccountSummary {
                id: account.id,
                name: account.name,
                email: account.email,
                role,
            },
        })
    }
}
