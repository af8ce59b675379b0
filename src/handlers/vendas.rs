// src/handlers/vendas.rs

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
    middleware::{auth::Autenticado, tenancy::EmpresaCode},
    models::venda::{CriarVendaPayload, Venda, VendaDetalhada},
    services::venda_service::VendaService,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroVendas {
    pub limit: Option<i64>,
}

// POST /api/vendas
#[utoipa::path(
    post,
    path = "/api/vendas",
    tag = "Vendas",
    request_body = CriarVendaPayload,
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Venda registrada", body = VendaDetalhada),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn registrar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Autenticado(principal): Autenticado,
    Json(payload): Json<CriarVendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let id_funcionario = principal.exigir_id()?;
    let service = VendaService::new(app_state);
    let venda = service.registrar(&empresa, &payload, id_funcionario).await?;

    Ok((StatusCode::CREATED, Json(venda)))
}

// GET /api/vendas
#[utoipa::path(
    get,
    path = "/api/vendas",
    tag = "Vendas",
    params(
        FiltroVendas,
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Vendas mais recentes", body = Vec<Venda>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Query(filtro): Query<FiltroVendas>,
) -> Result<Json<Vec<Venda>>, AppError> {
    let service = VendaService::new(app_state);
    let vendas = service.listar(&empresa, filtro.limit.unwrap_or(50)).await?;
    Ok(Json(vendas))
}

// GET /api/vendas/{id}
#[utoipa::path(
    get,
    path = "/api/vendas/{id}",
    tag = "Vendas",
    params(
        ("id" = i64, Path, description = "Id da venda"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Venda com seus itens", body = VendaDetalhada),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<Json<VendaDetalhada>, AppError> {
    let service = VendaService::new(app_state);
    let venda = service.buscar(&empresa, id).await?;
    Ok(Json(venda))
}
