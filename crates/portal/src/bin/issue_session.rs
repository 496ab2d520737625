//! Mints a session for an existing user so protected routes can be exercised locally.

use access::{
    abstract_trait::{JwtServiceTrait, UserRecordRepositoryTrait},
    cache::RedisSessionStore,
    config::{ConnectionManager, JwtConfig, RedisClient},
    domain::Session,
    repository::UserRecordRepository,
};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use portal::config::{Config, SessionBackend};

/// Issue a session cookie value for a user in the store
#[derive(Parser)]
#[command(name = "issue-session")]
#[command(version)]
struct Args {
    /// User ID to mint the session for
    #[arg(long)]
    user_id: String,

    /// Session backend (jwt or redis); defaults to SESSION_BACKEND
    #[arg(long)]
    backend: Option<SessionBackend>,

    /// Session lifetime in minutes
    #[arg(long, default_value = "60")]
    ttl_minutes: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let config = Config::init().context("Failed to load configuration")?;
    let backend = args.backend.unwrap_or(config.session_backend);
    let ttl = chrono::Duration::minutes(args.ttl_minutes.max(1));

    let db_pool = ConnectionManager::new_pool(&config.database)
        .await
        .context("Failed to connect to the user store")?;

    let record = UserRecordRepository::new(db_pool)
        .find_by_id(&args.user_id)
        .await?
        .ok_or_else(|| anyhow!("No user with id {}", args.user_id))?;

    let session = Session::from(record);

    let value = match backend {
        SessionBackend::Jwt => JwtConfig::new(&config.jwt_secret).generate_token(&session, ttl)?,
        SessionBackend::Redis => {
            let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
            RedisSessionStore::new(redis.pool)
                .create_session(&session, ttl)
                .await?
        }
    };

    println!("{}={}", config.session_cookie, value);

    Ok(())
}
