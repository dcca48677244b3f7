use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use orderdesk::logging::{init_tracing, shutdown_tracer};
use orderdesk::metrics::{init_metrics, metrics_app};
use orderdesk::orderdesk_db::{init_db_pool, run_migrations};
use orderdesk::router::init_router;
use orderdesk::state::AppState;

fn port_from_env(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing("storage/logs").expect("Failed to initialize tracing");

    let db = init_db_pool().await.expect("Failed to connect to database");
    run_migrations(&db).await.expect("Failed to run migrations");
    info!("Database ready");

    match init_metrics() {
        Ok(Some(handle)) => {
            let port = port_from_env("METRICS_PORT", 9090);
            tokio::spawn(async move {
                let addr = SocketAddr::from(([0, 0, 0, 0], port));
                match tokio::net::TcpListener::bind(addr).await {
                    Ok(listener) => {
                        info!(%addr, "Metrics server listening");
                        if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                            error!(error = %e, "Metrics server stopped");
                        }
                    }
                    Err(e) => error!(error = %e, %addr, "Failed to bind metrics port"),
                }
            });
        }
        Ok(None) => info!("Observability disabled, metrics not exported"),
        Err(e) => error!(error = %e, "Failed to install metrics recorder"),
    }

    let state = AppState::from_env(db);
    let app = init_router(state);

    let port = port_from_env("PORT", 3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port");

    info!(%addr, "Server running");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");
    info!("Scalar UI available at http://localhost:{port}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    shutdown_tracer();
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
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
