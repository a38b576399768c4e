//! Create the initial owner account. Accounts are otherwise never
//! created by the API itself.

use std::env;

use tracing::info;

use restaurant_api::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Missing required env var: DATABASE_URL"))?;
    let name = env::var("INITIAL_OWNER_NAME").unwrap_or_else(|_| "Owner".into());
    let email = env::var("INITIAL_OWNER_EMAIL").unwrap_or_else(|_| "owner@restaurant.local".into());
    let password = env::var("INITIAL_OWNER_PASSWORD")
        .map_err(|_| anyhow::anyhow!("Missing required env var: INITIAL_OWNER_PASSWORD"))?;

    let pool = db::create_pool(&database_url).await?;
    db::run_migrations(&pool).await?;

    let password_hash = bcrypt::hash(&password, 10)?;

    let result = sqlx::query(
        "INSERT INTO accounts (name, email, password, role)
         VALUES ($1, $2, $3, 'owner')
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .execute(&pool)
    .await?;

    if result.rows_affected() > 0 {
        info!("Created owner account {email}");
    } else {
        info!("Owner account {email} already exists, nothing to do");
    }

    Ok(())
}
