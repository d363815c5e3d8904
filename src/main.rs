//! Service entry point: connect the pool, ensure the schema, serve.

use school_api::{
    common_routes, ensure_students_table, ready_routes, student_routes, AppConfig, AppState,
    PgStudentRepo,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("school_api=info".parse()?))
        .init();

    let config = AppConfig::from_env();

    // Persistence connection failure at startup is the only fatal error.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to connect to database"))?;
    tracing::info!("connected to database");

    ensure_students_table(&pool).await?;

    let state = AppState::new(Arc::new(PgStudentRepo::new(pool.clone())));

    let app = Router::new()
        .merge(common_routes())
        .merge(ready_routes(pool.clone()))
        .nest("/students", student_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database connection closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
