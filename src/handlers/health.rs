// src/handlers/health.rs

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{common::error::AppError, config::AppState};

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Serviço e banco padrão respondendo"),
        (status = 503, description = "Banco padrão inacessível")
    )
)]
pub async fn health(State(app_state): State<AppState>) -> Result<Json<Value>, AppError> {
    let pool = app_state.router.pool_para(None).await?;
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|_| AppError::Conectividade)?;

    Ok(Json(json!({ "status": "ok" })))
}
