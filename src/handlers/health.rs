//! Health check handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::handlers::AppState;
use crate::utils::errors::Result;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    database: String,
    redis: String,
}

/// GET /health — liveness plus dependency health (no auth required)
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let database = match crate::database::health_check(&state.pool).await {
        Ok(()) => "healthy",
        Err(_) => "unhealthy",
    };

    let service_health = state.services.health_check().await;
    let redis = if service_health.redis_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status = if database == "healthy" && service_health.is_healthy() {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        redis: redis.to_string(),
    }))
}
