// src/handlers/pacotes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::{ClienteRepository, PacoteRepository},
    middleware::tenancy::EmpresaCode,
    models::pacote::{
        AtualizarPacotePayload, ClientePacote, ClientePacoteResumo, CriarPacotePayload,
        PacoteDetalhado, VenderPacotePayload,
    },
    services::pacote_ledger::{TIPO_COMBO, TIPO_CREDITOS},
};

/// Regras da definição de pacote: `creditos` exige validade e quantidade
/// de usos; `combo` não aceita nenhum dos dois.
pub fn validar_definicao(
    tipo: &str,
    validade_dias: Option<i32>,
    max_usos: Option<i32>,
) -> Result<(), AppError> {
    match tipo {
        TIPO_CREDITOS => {
            if validade_dias.is_none() || max_usos.is_none() {
                return Err(AppError::RegraDeNegocio(
                    "Pacotes de créditos exigem validade_dias e max_usos".to_string(),
                ));
            }
            if max_usos.is_some_and(|usos| usos < 1) || validade_dias.is_some_and(|dias| dias < 1)
            {
                return Err(AppError::RegraDeNegocio(
                    "validade_dias e max_usos devem ser positivos".to_string(),
                ));
            }
            Ok(())
        }
        TIPO_COMBO => {
            if validade_dias.is_some() || max_usos.is_some() {
                return Err(AppError::RegraDeNegocio(
                    "Pacotes combo não aceitam validade_dias nem max_usos".to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(AppError::PacoteInvalido),
    }
}

// GET /api/pacotes
#[utoipa::path(
    get,
    path = "/api/pacotes",
    tag = "Pacotes",
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Pacotes ativos", body = Vec<PacoteDetalhado>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
) -> Result<Json<Vec<PacoteDetalhado>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let pacotes = PacoteRepository::listar(&pool).await?;
    let mut detalhados = Vec::with_capacity(pacotes.len());
    for pacote in pacotes {
        let servicos = PacoteRepository::servicos_do_pacote(&pool, pacote.id).await?;
        detalhados.push(PacoteDetalhado { pacote, servicos });
    }

    Ok(Json(detalhados))
}

// POST /api/pacotes
#[utoipa::path(
    post,
    path = "/api/pacotes",
    tag = "Pacotes",
    request_body = CriarPacotePayload,
    params(
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Pacote criado", body = PacoteDetalhado),
        (status = 400, description = "Definição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Json(payload): Json<CriarPacotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    validar_definicao(&payload.tipo, payload.validade_dias, payload.max_usos)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    // Pacote e associações de serviço nascem juntos ou não nascem.
    let mut tx = pool.begin().await?;

    let pacote = PacoteRepository::criar(&mut *tx, &payload).await?;
    for id_servico in &payload.servicos {
        PacoteRepository::associar_servico(&mut *tx, pacote.id, *id_servico).await?;
    }

    tx.commit().await?;

    let servicos = PacoteRepository::servicos_do_pacote(&pool, pacote.id).await?;

    tracing::info!("📦 Pacote '{}' criado", pacote.nome);
    Ok((StatusCode::CREATED, Json(PacoteDetalhado { pacote, servicos })))
}

// GET /api/pacotes/{id}
#[utoipa::path(
    get,
    path = "/api/pacotes/{id}",
    tag = "Pacotes",
    params(
        ("id" = i64, Path, description = "Id do pacote"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Pacote com seus serviços", body = PacoteDetalhado),
        (status = 404, description = "Pacote não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<Json<PacoteDetalhado>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let pacote = PacoteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Pacote"))?;
    let servicos = PacoteRepository::servicos_do_pacote(&pool, id).await?;

    Ok(Json(PacoteDetalhado { pacote, servicos }))
}

// PUT /api/pacotes/{id}
#[utoipa::path(
    put,
    path = "/api/pacotes/{id}",
    tag = "Pacotes",
    request_body = AtualizarPacotePayload,
    params(
        ("id" = i64, Path, description = "Id do pacote"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Pacote atualizado", body = PacoteDetalhado),
        (status = 404, description = "Pacote não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarPacotePayload>,
) -> Result<Json<PacoteDetalhado>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let pacote = PacoteRepository::atualizar(&pool, id, &payload)
        .await?
        .ok_or(AppError::NaoEncontrado("Pacote"))?;
    validar_definicao(&pacote.tipo, pacote.validade_dias, pacote.max_usos)?;

    let servicos = PacoteRepository::servicos_do_pacote(&pool, id).await?;
    Ok(Json(PacoteDetalhado { pacote, servicos }))
}

// DELETE /api/pacotes/{id}
#[utoipa::path(
    delete,
    path = "/api/pacotes/{id}",
    tag = "Pacotes",
    params(
        ("id" = i64, Path, description = "Id do pacote"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 204, description = "Pacote desativado"),
        (status = 404, description = "Pacote não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn desativar(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    if PacoteRepository::desativar(&pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NaoEncontrado("Pacote"))
    }
}

// POST /api/pacotes/{id}/vender
#[utoipa::path(
    post,
    path = "/api/pacotes/{id}/vender",
    tag = "Pacotes",
    request_body = VenderPacotePayload,
    params(
        ("id" = i64, Path, description = "Id do pacote"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 201, description = "Pacote vendido ao cliente", body = ClientePacote),
        (status = 404, description = "Pacote ou cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn vender(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
    Json(payload): Json<VenderPacotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    let pacote = PacoteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Pacote"))?;
    ClienteRepository::buscar(&pool, payload.id_cliente)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;

    // Saldo e validade vêm da definição do pacote no momento da venda.
    let usos_iniciais = pacote.max_usos;
    let data_validade = pacote
        .validade_dias
        .map(|dias| Utc::now().date_naive() + Duration::days(i64::from(dias)));

    let cliente_pacote =
        PacoteRepository::vender(&pool, id, payload.id_cliente, usos_iniciais, data_validade)
            .await?;

    tracing::info!(
        "📦 Pacote {} vendido para o cliente {}",
        id,
        payload.id_cliente
    );
    Ok((StatusCode::CREATED, Json(cliente_pacote)))
}

// GET /api/clientes/{id}/pacotes
#[utoipa::path(
    get,
    path = "/api/clientes/{id}/pacotes",
    tag = "Pacotes",
    params(
        ("id" = i64, Path, description = "Id do cliente"),
        ("X-Empresa" = Option<String>, Header, description = "Código da empresa")
    ),
    responses(
        (status = 200, description = "Pacotes comprados pelo cliente", body = Vec<ClientePacoteResumo>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn pacotes_do_cliente(
    State(app_state): State<AppState>,
    EmpresaCode(empresa): EmpresaCode,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ClientePacoteResumo>>, AppError> {
    let pool = app_state.router.pool_para(Some(&empresa)).await?;

    ClienteRepository::buscar(&pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("Cliente"))?;

    let pacotes = PacoteRepository::pacotes_do_cliente(&pool, id).await?;
    Ok(Json(pacotes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creditos_exige_validade_e_usos() {
        assert!(validar_definicao(TIPO_CREDITOS, Some(30), Some(5)).is_ok());
        assert!(validar_definicao(TIPO_CREDITOS, None, Some(5)).is_err());
        assert!(validar_definicao(TIPO_CREDITOS, Some(30), None).is_err());
        assert!(validar_definicao(TIPO_CREDITOS, Some(0), Some(5)).is_err());
        assert!(validar_definicao(TIPO_CREDITOS, Some(30), Some(0)).is_err());
    }

    #[test]
    fn combo_nao_aceita_validade_nem_usos() {
        assert!(validar_definicao(TIPO_COMBO, None, None).is_ok());
        assert!(validar_definicao(TIPO_COMBO, Some(30), None).is_err());
        assert!(validar_definicao(TIPO_COMBO, None, Some(1)).is_err());
    }

    #[test]
    fn tipo_desconhecido_e_rejeitado() {
        assert!(matches!(
            validar_definicao("assinatura", None, None),
            Err(AppError::PacoteInvalido)
        ));
    }
}
