//! Route wiring: the /students collection plus common service routes.

use crate::handlers::students;
use crate::response::{self, MessageOnly};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;

/// The student collection. Mounted under `/students`.
pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(students::list).post(students::create))
        .route(
            "/:reg_no",
            get(students::get_by_reg_no)
                .put(students::update)
                .delete(students::delete),
        )
        .with_state(state)
}

async fn welcome() -> (axum::http::StatusCode, Json<MessageOnly>) {
    response::message("Welcome to School Management System API")
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn ready(
    State(pool): State<PgPool>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1").fetch_optional(&pool).await.is_err() {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

/// Welcome banner, liveness, and version. No state required.
pub fn common_routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/version", get(version))
}

/// Readiness with a database ping. Only mounted when serving against
/// PostgreSQL.
pub fn ready_routes(pool: PgPool) -> Router {
    Router::new().route("/ready", get(ready)).with_state(pool)
}
