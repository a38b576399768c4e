use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Owner,
    Employee,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccountRole::Owner => "owner",
            AccountRole::Employee => "employee",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccountRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(AccountRole::Owner),
            "employee" => Ok(AccountRole::Employee),
            _ => Err(anyhow::anyhow!("Unknown role: {s}")),
        }
    }
}

/// DB row struct — role is stored as TEXT and parsed where a typed role is needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub avatar: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Unknown role text degrades to the least-privileged role.
    pub fn role(&self) -> AccountRole {
        self.role.parse().unwrap_or(AccountRole::Employee)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub account_id: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub code: String,
}

/// Subset of the account returned by the Google login flow.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

#[derive(Debug, Serialize)]
pub struct GoogleLoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!("owner".parse::<AccountRole>().unwrap(), AccountRole::Owner);
        assert_eq!(AccountRole::Employee.to_string(), "employee");
        assert_eq!(
            AccountRole::Owner.to_string().parse::<AccountRole>().unwrap(),
            AccountRole::Owner
        );
    }

    #[test]
    fn unknown_role_text_is_rejected() {
        assert!("manager".parse::<AccountRole>().is_err());
    }

    #[test]
    fn password_is_never_serialized() {
        let account = Account {
            id: 1,
            name: "Owner".into(),
            email: "owner@example.com".into(),
            password: "$2b$10$secret".into(),
            avatar: None,
            role: "owner".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "owner@example.com");
    }
}
