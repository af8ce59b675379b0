// src/handlers/catalogo.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    db::CatalogoRepository,
    middleware::tenancy::EmpresaCode,
    models::catalogo::{Produto, Servico},
};

// GET /api/produtos
#[utoipa::path(
    get,
    path = "/api/produtos",
    tag = "Catálogo",
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Produtos ativos com o estoque agregado", body = Vec<Produto>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_produtos(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
) -> Result<Json<Vec<Produto>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;
    let produtos = CatalogoRepository::listar_produtos(&pool).await?;
    Ok(Json(produtos))
}

// GET /api/servicos
#[utoipa::path(
    get,
    path = "/api/servicos",
    tag = "Catálogo",
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Serviços ativos", body = Vec<Servico>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_servicos(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
) -> Result<Json<Vec<Servico>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;
    let servicos = CatalogoRepository::listar_servicos(&pool).await?;
    Ok(Json(servicos))
}
