use anyhow::{Context, Result};
use portfolio_db::{create_pool, run_migrations, UserRepo};
use portfolio_server::auth::{hash_password, prepare_dummy_credential};
use portfolio_server::config::{load_config, InitialUserConfig};
use portfolio_server::state::AppState;
use portfolio_server::token::TokenConfig;
use sqlx::PgPool;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting portfolio server");

    // Load configuration
    let config_path =
        std::env::var("PORTFOLIO_CONFIG").unwrap_or_else(|_| "server-config.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);
    let config = load_config(&config_path)?;

    // Signing key problems are fatal before anything else starts
    let tokens = TokenConfig::from_config(&config.jwt).context("Invalid jwt configuration")?;
    tracing::info!(
        "Tokens issued as '{}' for audience '{}'",
        tokens.issuer,
        tokens.audience
    );

    // Unknown-email logins verify against this hash; build it before serving
    if !prepare_dummy_credential() {
        tracing::warn!("Dummy credential unavailable, unknown-email logins will return early");
    }

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.db.url)
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    if let Some(initial_user) = &config.initial_user {
        seed_initial_user(&pool, initial_user).await?;
    }

    let state = AppState::with_pool(pool, tokens);
    let app = portfolio_server::web::build_router(state, &config.cors);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen))?;

    tracing::info!("Server listening on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn seed_initial_user(pool: &PgPool, initial_user: &InitialUserConfig) -> Result<()> {
    match UserRepo::get_by_email(pool, &initial_user.email).await {
        Ok(Some(_)) => {
            tracing::info!(
                "Initial user '{}' already exists, skipping seed",
                initial_user.email
            );
        }
        Ok(None) => {
            let password_hash = hash_password(&initial_user.password)
                .context("Failed to hash initial user password")?;
            UserRepo::create(pool, &initial_user.name, &initial_user.email, &password_hash)
                .await
                .context("Failed to create initial user")?;
            tracing::info!("Created initial user: {}", initial_user.email);
        }
        Err(e) => {
            tracing::warn!("Failed to check for initial user: {:#}", e);
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
