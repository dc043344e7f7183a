use anyhow::Context;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use user_projects_api::{config::AppConfig, db, routes, services::bootstrap, telemetry, AppState};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_projects_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("Failed to apply database migrations")?;
    } else {
        tracing::info!("RUN_MIGRATIONS disabled, skipping schema migrations");
    }

    let outcome = bootstrap::ensure_bootstrap_user(&pool, &config.bootstrap)
        .await
        .context("Failed to provision bootstrap user")?;
    tracing::info!(email = %config.bootstrap.email, ?outcome, "Bootstrap user ready");

    let metrics = telemetry::install_recorder().context("Failed to install metrics recorder")?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        db: pool,
        config,
        metrics,
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(host = %addr, "Starting user projects API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
