// src/handlers/clientes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::ClienteRepository,
    middleware::tenancy::EmpresaCode,
    models::cliente::{
        AtualizarClientePayload, Cliente, CriarClientePayload, CriarPetPayload, Pet,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroClientes {
    /// Busca por nome (parcial, sem diferenciar maiúsculas).
    pub busca: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(
        FiltroClientes,
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Query(filtro): Query<FiltroClientes>,
) -> Result<Json<Vec<Cliente>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let limit = filtro.limit.unwrap_or(50).clamp(1, 200);
    let offset = filtro.offset.unwrap_or(0).max(0);

    let clientes =
        ClienteRepository::listar(&pool, filtro.busca.as_deref(), limit, offset).await?;
    Ok(Json(clientes))
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CriarClientePayload,
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Json(payload): Json<CriarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;
    let cliente = ClienteRepository::criar(&pool, &payload).await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Cliente encontrado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<Json<Cliente>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let cliente = ClienteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;
    Ok(Json(cliente))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    request_body = AtualizarClientePayload,
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarClientePayload>,
) -> Result<Json<Cliente>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;
    let cliente = ClienteRepository::atualizar(&pool, id, &payload)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 204, description = "Cliente desativado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn desativar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    if ClienteRepository::desativar(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NaoEncontrado("Cliente"))
    }
}

// GET /api/clientes/{id}/pets
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/pets",
    tag = "Clientes",
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Pets do cliente", body = Vec<Pet>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_pets(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Pet>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    // 404 explícito em vez de lista vazia para cliente inexistente.
    ClienteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;

    let pets = ClienteRepository::listar_pets(&pool, id).await?;
    Ok(Json(pets))
}

// POST /api/clientes/{id}/pets
#[utoipa::path(
    post,
    path = "/api/clientes/{id}/pets",
    tag = "Clientes",
    request_body = CriarPetPayload,
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Pet cadastrado", body = Pet),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_pet(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
    Json(payload): Json<CriarPetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    ClienteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;

    let pet = ClienteRepository::criar_pet(&pool, id, &payload).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}
