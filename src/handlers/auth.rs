// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::Autenticado, tenancy::EmpresaCode},
    models::auth::{CurrentUser, LoginPayload, RespostaLogin},
    services::auth::AuthService,
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Login efetuado", body = RespostaLogin),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<RespostaLogin>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let auth_service = AuthService::new(app_state);
    let token = auth_service
        .login(&empresa, &payload.login, &payload.senha)
        .await?;

    Ok(Json(RespostaLogin {
        access_token: token,
        token_type: "Bearer".to_string(),
    }))
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Principal autenticado", body = CurrentUser),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn me(Autenticado(principal): Autenticado) -> Json<CurrentUser> {
    Json(principal)
}
