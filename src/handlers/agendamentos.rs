// src/handlers/agendamentos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::Autenticado, tenancy::EmpresaCode},
    models::agendamento::{
        Agendamento, AgendamentoDetalhado, AtualizarStatusPayload, ContagemDia,
        CriarAgendamentoPayload, FiltroAgendamentos, FiltroCalendario,
    },
    services::agendamento_service::AgendamentoService,
};

// POST /api/agendamentos
#[utoipa::path(
    post,
    path = "/api/agendamentos",
    tag = "Agendamentos",
    request_body = CriarAgendamentoPayload,
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Agendamento criado", body = Agendamento),
        (status = 400, description = "Dados inválidos ou pacote sem créditos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Autenticado(principal): Autenticado,
    Json(payload): Json<CriarAgendamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let id_funcionario = principal.exigir_id()?;
    let service = AgendamentoService::new(app_state);
    let agendamento = service.criar(&empresa, &payload, id_funcionario).await?;

    Ok((StatusCode::CREATED, Json(agendamento)))
}

// GET /api/agendamentos
#[utoipa::path(
    get,
    path = "/api/agendamentos",
    tag = "Agendamentos",
    params(
        FiltroAgendamentos,
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Agendamentos filtrados", body = Vec<AgendamentoDetalhado>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Query(filtro): Query<FiltroAgendamentos>,
) -> Result<Json<Vec<AgendamentoDetalhado>>, AppError> {
    let service = AgendamentoService::new(app_state);
    let agendamentos = service.listar(&empresa, &filtro).await?;
    Ok(Json(agendamentos))
}

// GET /api/agendamentos/hoje
#[utoipa::path(
    get,
    path = "/api/agendamentos/hoje",
    tag = "Agendamentos",
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Agendamentos do dia corrente", body = Vec<AgendamentoDetalhado>)
    ),
    security(("api_jwt" = []))
)]
pub async fn hoje(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
) -> Result<Json<Vec<AgendamentoDetalhado>>, AppError> {
    let service = AgendamentoService::new(app_state);
    let agendamentos = service.hoje(&empresa).await?;
    Ok(Json(agendamentos))
}

// GET /api/agendamentos/calendario
#[utoipa::path(
    get,
    path = "/api/agendamentos/calendario",
    tag = "Agendamentos",
    params(
        FiltroCalendario,
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Total de agendamentos por dia do mês", body = Vec<ContagemDia>),
        (status = 400, description = "Mês inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn calendario(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Query(filtro): Query<FiltroCalendario>,
) -> Result<Json<Vec<ContagemDia>>, AppError> {
    let service = AgendamentoService::new(app_state);
    let contagens = service.calendario(&empresa, filtro.ano, filtro.mes).await?;
    Ok(Json(contagens))
}

// PATCH /api/agendamentos/{id}/status
#[utoipa::path(
    patch,
    path = "/api/agendamentos/{id}/status",
    tag = "Agendamentos",
    request_body = AtualizarStatusPayload,
    params(
        ("id" = i64, Path, description = "Id do agendamento"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Status atualizado", body = Agendamento),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn mudar_status(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarStatusPayload>,
) -> Result<Json<Agendamento>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = AgendamentoService::new(app_state);
    let agendamento = service.mudar_status(&empresa, id, &payload.status).await?;
    Ok(Json(agendamento))
}
