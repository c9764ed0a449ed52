use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tanmia_api::auth::password::hash_password;
use tanmia_api::config::ServerConfig;
use tanmia_api::router::build_app_router;
use tanmia_api::state::AppState;
use tanmia_db::models::user::CreateUser;
use tanmia_db::storage::{MemStorage, PgStorage, Storage};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tanmia_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let store = build_store().await;

    // --- Admin bootstrap ---
    bootstrap_admin(store.as_ref()).await;

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Select the storage backend from the environment.
///
/// With a `DATABASE_URL`, connect to PostgreSQL and apply migrations.
/// Without one, fall back to the in-memory store -- useful for demos and
/// local evaluation, but all data is lost on exit.
async fn build_store() -> Arc<dyn Storage> {
    match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = tanmia_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            tanmia_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            tanmia_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgStorage::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is not persisted)");
            Arc::new(MemStorage::new())
        }
    }
}

/// Seed the initial `admin` account.
///
/// Runs only when the user table is empty and `ADMIN_PASSWORD` is set.
/// Without an admin, the admin-only account management is unreachable.
async fn bootstrap_admin(store: &dyn Storage) {
    let users = store
        .list_users()
        .await
        .expect("Failed to inspect user table at startup");
    if !users.is_empty() {
        return;
    }

    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!("No users exist and ADMIN_PASSWORD is not set; skipping admin bootstrap");
        return;
    };

    let password_hash = hash_password(&password).expect("Failed to hash ADMIN_PASSWORD");
    let admin = store
        .create_user(&CreateUser {
            username: "admin".to_string(),
            password_hash,
            role: tanmia_core::roles::ROLE_ADMIN.to_string(),
        })
        .await
        .expect("Failed to create bootstrap admin account");

    tracing::info!(user_id = admin.id, "Bootstrap admin account created");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
