use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use redis::Client;
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_adapters::{
    JwtTokenIssuer, JwtTokenValidator, PostgresCredentialStore, PostgresResetTokenStore,
    PostmarkNotifier, RedisRevokedTokenStore, Settings, SigningKeys,
};
use gatehouse_core::Identity;
use gatehouse_service::{AllowedOrigins, AuthService};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool
    let postgres = settings
        .postgres
        .as_ref()
        .ok_or_else(|| eyre!("postgres.url must be configured"))?;
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(postgres.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    // Setup Redis connection
    let redis_settings = settings
        .redis
        .as_ref()
        .ok_or_else(|| eyre!("redis.host_name must be configured"))?;
    let redis_client = Client::open(format!("redis://{}/", redis_settings.host_name))?;
    let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));

    // Create stores
    let credential_store = PostgresCredentialStore::new(pg_pool.clone());
    let reset_token_store = PostgresResetTokenStore::new(pg_pool);
    let revoked_token_store =
        RedisRevokedTokenStore::new(redis_conn, settings.auth.session_ttl_seconds as u64);

    // Create the token components around one shared key ring
    let signing_keys = match settings.auth.signing_secret.clone() {
        Some(secret) => SigningKeys::new(secret),
        None => {
            tracing::warn!("no signing secret configured, issuing with an ephemeral key");
            SigningKeys::ephemeral()
        }
    };
    let token_issuer = JwtTokenIssuer::new(signing_keys.clone(), settings.token_config());
    let token_validator = JwtTokenValidator::new(signing_keys, revoked_token_store.clone());

    // Create the notifier
    let notifier_settings = settings
        .notifier
        .as_ref()
        .ok_or_else(|| eyre!("notifier must be configured"))?;
    let http_client = HttpClient::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let notifier = PostmarkNotifier::new(
        notifier_settings.base_url.clone(),
        Identity::try_from(Secret::from(notifier_settings.sender.clone()))?,
        notifier_settings.auth_token.clone(),
        http_client,
    );

    let allowed_origins = if settings.cors.allowed_origins.is_empty() {
        None
    } else {
        Some(AllowedOrigins::parse(&settings.cors.allowed_origins)?)
    };

    let service = AuthService::new(
        credential_store,
        reset_token_store,
        revoked_token_store,
        notifier,
        token_issuer,
        token_validator,
    );

    let listener = tokio::net::TcpListener::bind(&settings.bind_address).await?;
    service.run(listener, allowed_origins).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
