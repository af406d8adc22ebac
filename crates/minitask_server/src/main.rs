//! Server entry point.
//!
//! # Responsibility
//! - Resolve configuration, bring up logging, run startup migrations, and
//!   serve the router until a shutdown signal arrives.

use anyhow::{anyhow, Context, Result};
use log::info;
use minitask_core::{init_logging, ConnectionPool};
use minitask_server::config::ServerConfig;
use minitask_server::routes::create_router;
use minitask_server::state::AppState;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    init_logging(&config.log_config()).map_err(|err| anyhow!(err))?;

    // Opening the pool applies pending schema migrations before the first
    // request can arrive.
    let pool = ConnectionPool::open(config.database_path.clone()).with_context(|| {
        format!(
            "cannot open database at `{}`",
            config.database_path.display()
        )
    })?;

    let router = create_router(AppState::new(pool));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind `{addr}`"))?;

    info!("event=server_start module=server status=ok addr={addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("event=server_shutdown module=server status=start reason=interrupt");
        }
        () = terminate => {
            info!("event=server_shutdown module=server status=start reason=terminate");
        }
    }
}
