use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub jwt_expiry_seconds: u64,
    pub jwt_refresh_expiry_days: u64,
    pub client_origin: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".into())
                .parse()?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_refresh_secret: required("JWT_REFRESH_SECRET")?,
            jwt_expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "900".into())
                .parse()?,
            jwt_refresh_expiry_days: env::var("JWT_REFRESH_EXPIRY_DAYS")
                .unwrap_or_else(|_| "30".into())
                .parse()?,
            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            google_client_id: required("GOOGLE_CLIENT_ID")?,
            google_client_secret: required("GOOGLE_CLIENT_SECRET")?,
            google_redirect_uri: required("GOOGLE_AUTHORIZED_REDIRECT_URI")?,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        for (key, value) in [
            ("DATABASE_URL", "postgres://localhost/restaurant"),
            ("JWT_SECRET", "s1"),
            ("JWT_REFRESH_SECRET", "s2"),
            ("GOOGLE_CLIENT_ID", "cid"),
            ("GOOGLE_CLIENT_SECRET", "csecret"),
            ("GOOGLE_AUTHORIZED_REDIRECT_URI", "http://localhost:3000/oauth"),
        ] {
            env::set_var(key, value);
        }
        for key in ["PORT", "JWT_EXPIRY_SECONDS", "JWT_REFRESH_EXPIRY_DAYS", "CLIENT_ORIGIN"] {
            env::remove_var(key);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.jwt_expiry_seconds, 900);
        assert_eq!(config.jwt_refresh_expiry_days, 30);
        assert_eq!(config.client_origin, "http://localhost:3000");
    }
}
