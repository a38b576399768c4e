use reqwest::Client;
use serde::Deserialize;

use crate::{config::Config, error::AppError};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// Tokens returned by Google's code exchange.
#[derive(Debug, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
    pub id_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Federated profile fetched from the userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    pub verified_email: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// OAuth client with credentials injected at construction, never read
/// from the environment at call time.
pub struct GoogleOauthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOauthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
        }
    }

    /// Exchange an authorization code for provider tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleTokens, AppError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let tokens = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleTokens>()
            .await?;
        Ok(tokens)
    }

    /// Fetch the federated user profile with the exchanged tokens.
    pub async fn fetch_profile(&self, tokens: &GoogleTokens) -> Result<GoogleProfile, AppError> {
        let profile = self
            .http
            .get(USERINFO_ENDPOINT)
            .query(&[
                ("access_token", tokens.access_token.as_str()),
                ("alt", "json"),
            ])
            .bearer_auth(&tokens.id_token)
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleProfile>()
            .await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_provider_payload() {
        let json = r#"{
            "id": "108234987",
            "email": "chef@example.com",
            "verified_email": false,
            "name": "Chef",
            "given_name": "Chef",
            "family_name": "Example",
            "picture": "https://example.com/p.jpg"
        }"#;
        let profile: GoogleProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "chef@example.com");
        assert!(!profile.verified_email);
    }

    #[test]
    fn tokens_tolerate_missing_optional_fields() {
        let json = r#"{ "access_token": "at", "id_token": "idt" }"#;
        let tokens: GoogleTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "at");
        assert!(tokens.expires_in.is_none());
    }
}
