// src/handlers/empresas.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::Autenticado,
    models::empresa::{
        AtualizarEmpresaPayload, CriarEmpresaPayload, Empresa, RegistrarBancoPayload,
    },
    services::empresa_service::EmpresaService,
};

// GET /api/empresas/minha
#[utoipa::path(
    get,
    path = "/api/empresas/minha",
    tag = "Empresas",
    responses(
        (status = 200, description = "Empresa do principal autenticado", body = Empresa),
        (status = 403, description = "Empresa inativa"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn minha(
    State(app_state): State<AppState>,
    Autenticado(principal): Autenticado,
) -> Result<Json<Empresa>, AppError> {
    let service = EmpresaService::new(app_state);
    let empresa = service.minha_empresa(&principal).await?;
    Ok(Json(empresa))
}

// PUT /api/empresas/minha
#[utoipa::path(
    put,
    path = "/api/empresas/minha",
    tag = "Empresas",
    request_body = AtualizarEmpresaPayload,
    responses(
        (status = 200, description = "Cadastro atualizado", body = Empresa),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_minha(
    State(app_state): State<AppState>,
    Autenticado(principal): Autenticado,
    Json(payload): Json<AtualizarEmpresaPayload>,
) -> Result<Json<Empresa>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = EmpresaService::new(app_state);
    let empresa = service.atualizar_minha_empresa(&principal, &payload).await?;
    Ok(Json(empresa))
}

// GET /api/empresas
#[utoipa::path(
    get,
    path = "/api/empresas",
    tag = "Empresas",
    responses(
        (status = 200, description = "Todas as empresas cadastradas", body = Vec<Empresa>),
        (status = 403, description = "Acesso restrito a superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Autenticado(principal): Autenticado,
) -> Result<Json<Vec<Empresa>>, AppError> {
    let service = EmpresaService::new(app_state);
    let empresas = service.listar_todas(&principal).await?;
    Ok(Json(empresas))
}

// POST /api/empresas
#[utoipa::path(
    post,
    path = "/api/empresas",
    tag = "Empresas",
    request_body = CriarEmpresaPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Empresa),
        (status = 400, description = "Código já em uso"),
        (status = 403, description = "Acesso restrito a superadmin")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Autenticado(principal): Autenticado,
    Json(payload): Json<CriarEmpresaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = EmpresaService::new(app_state);
    let empresa = service.criar(&principal, &payload).await?;
    Ok((StatusCode::CREATED, Json(empresa)))
}

// POST /api/empresas/{codigo}/banco
#[utoipa::path(
    post,
    path = "/api/empresas/{codigo}/banco",
    tag = "Empresas",
    request_body = RegistrarBancoPayload,
    params(
        ("codigo" = String, Path, description = "Código da empresa")
    ),
    responses(
        (status = 204, description = "Banco registrado no roteador"),
        (status = 403, description = "Acesso restrito a superadmin"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn registrar_banco(
    State(app_state): State<AppState>,
    Autenticado(principal): Autenticado,
    Path(codigo): Path<String>,
    Json(payload): Json<RegistrarBancoPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = EmpresaService::new(app_state);
    service
        .registrar_banco(&principal, &codigo, &payload.database_url)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
