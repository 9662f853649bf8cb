use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use zenith_auth::Authenticator;
use zenith_backend_api::{build_router, AppState};
use zenith_config::load as load_config;
use zenith_database::initialize_database;

#[derive(Parser)]
#[command(name = "zenith-backend")]
#[command(about = "Zenith marketplace backend (HTTP server by default)")]
struct Cli {
    /// Explicit configuration file, overriding the default search path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured listen address
    #[arg(long)]
    address: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Grant the admin role to an existing account
    PromoteAdmin {
        /// Email of the account to promote
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    if let Some(path) = &cli.config {
        std::env::set_var("ZENITH_CONFIG", path);
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(cli.address, cli.port).await,
        Commands::PromoteAdmin { email } => promote_admin(&email).await,
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

async fn run_server(address: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    info!("starting Zenith backend");

    let mut config = load_config().context("failed to load configuration")?;
    if let Some(address) = address {
        config.http.address = address;
    }
    if let Some(port) = port {
        config.http.port = port;
    }

    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialize database")?;

    let authenticator = Authenticator::new(pool.clone(), config.auth.clone());
    info!(
        session_ttl_seconds = config.auth.session_ttl_seconds,
        "authentication subsystem ready"
    );

    let state = AppState::new(pool, authenticator, config.listings.clone());
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

/// Review endpoints demand an admin session, so the first administrator has
/// to be minted from the command line.
async fn promote_admin(email: &str) -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialize database")?;

    let email = email.trim().to_ascii_lowercase();
    let result = sqlx::query(
        "UPDATE users SET role = 'admin', updated_at = ? WHERE email = ? AND status != 'deleted'",
    )
    .bind(sqlx::types::chrono::Utc::now().to_rfc3339())
    .bind(&email)
    .execute(&pool)
    .await
    .context("failed to update user role")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("no active account found for {email}");
    }

    info!(%email, "account promoted to administrator");
    println!("{email} is now an administrator");
    Ok(())
}

fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
    }
}
