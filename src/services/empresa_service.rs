// src/services/empresa_service.rs

use crate::{
    common::error::AppError,
    config::AppState,
    db::EmpresaRepository,
    models::auth::CurrentUser,
    models::empresa::{AtualizarEmpresaPayload, CriarEmpresaPayload, Empresa},
};

/// Parte pura da autorização: superadmin passa sempre; os demais só
/// acessam a própria empresa.
pub fn autorizar_alvo(principal: &CurrentUser, empresa_id: i64) -> Result<(), AppError> {
    if principal.is_superadmin {
        return Ok(());
    }
    if principal.empresa_id == Some(empresa_id) {
        Ok(())
    } else {
        Err(AppError::AcessoNegado)
    }
}

fn exigir_superadmin(principal: &CurrentUser) -> Result<(), AppError> {
    if principal.is_superadmin {
        Ok(())
    } else {
        Err(AppError::AcessoNegado)
    }
}

pub struct EmpresaService {
    app_state: AppState,
}

impl EmpresaService {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Regras de acesso a uma empresa, na ordem: superadmin passa direto;
    /// o alvo precisa ser a empresa do próprio principal (403); a linha
    /// precisa existir (404) e estar ativa (403, com motivo distinto).
    pub async fn validar_acesso(
        &self,
        principal: &CurrentUser,
        empresa_id: i64,
    ) -> Result<(), AppError> {
        if principal.is_superadmin {
            return Ok(());
        }

        autorizar_alvo(principal, empresa_id)?;

        let pool = self.app_state.router.pool_para(None).await?;
        let empresa = EmpresaRepository::buscar_por_id(&pool, empresa_id)
            .await?
            .ok_or(AppError::EmpresaNaoEncontrada)?;

        if !empresa.ativo {
            return Err(AppError::EmpresaInativa);
        }

        Ok(())
    }

    /// A empresa do próprio principal (cadastro no banco raiz).
    pub async fn minha_empresa(&self, principal: &CurrentUser) -> Result<Empresa, AppError> {
        let empresa_id = principal.empresa_id.ok_or(AppError::EmpresaNaoEncontrada)?;
        self.validar_acesso(principal, empresa_id).await?;

        let pool = self.app_state.router.pool_para(None).await?;
        EmpresaRepository::buscar_por_id(&pool, empresa_id)
            .await?
            .ok_or(AppError::EmpresaNaoEncontrada)
    }

    pub async fn atualizar_minha_empresa(
        &self,
        principal: &CurrentUser,
        payload: &AtualizarEmpresaPayload,
    ) -> Result<Empresa, AppError> {
        let empresa_id = principal.empresa_id.ok_or(AppError::EmpresaNaoEncontrada)?;
        self.validar_acesso(principal, empresa_id).await?;

        let pool = self.app_state.router.pool_para(None).await?;
        EmpresaRepository::atualizar(&pool, empresa_id, payload)
            .await?
            .ok_or(AppError::EmpresaNaoEncontrada)
    }

    /// Listagem administrativa: todas as empresas, só para superadmin.
    pub async fn listar_todas(&self, principal: &CurrentUser) -> Result<Vec<Empresa>, AppError> {
        exigir_superadmin(principal)?;
        let pool = self.app_state.router.pool_para(None).await?;
        EmpresaRepository::listar(&pool).await
    }

    pub async fn criar(
        &self,
        principal: &CurrentUser,
        payload: &CriarEmpresaPayload,
    ) -> Result<Empresa, AppError> {
        exigir_superadmin(principal)?;

        let pool = self.app_state.router.pool_para(None).await?;

        if EmpresaRepository::buscar_por_codigo(&pool, &payload.codigo)
            .await?
            .is_some()
        {
            return Err(AppError::RegraDeNegocio(format!(
                "Já existe uma empresa com o código '{}'",
                payload.codigo
            )));
        }

        let empresa = EmpresaRepository::criar(&pool, payload).await?;
        tracing::info!("🏢 Empresa '{}' criada", empresa.codigo);
        Ok(empresa)
    }

    /// Registra no roteador o banco recém-provisionado de uma empresa.
    /// Requisições seguintes com o código dela já roteiam para o novo
    /// banco; pools aquecidos não são tocados.
    pub async fn registrar_banco(
        &self,
        principal: &CurrentUser,
        codigo: &str,
        database_url: &str,
    ) -> Result<(), AppError> {
        exigir_superadmin(principal)?;

        let pool = self.app_state.router.pool_para(None).await?;
        EmpresaRepository::buscar_por_codigo(&pool, codigo)
            .await?
            .ok_or(AppError::EmpresaNaoEncontrada)?;

        self.app_state
            .router
            .registrar_empresa(codigo, database_url)
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(empresa_id: Option<i64>, is_superadmin: bool) -> CurrentUser {
        CurrentUser {
            id: Some(1),
            login: "ana".to_string(),
            nome: "Ana".to_string(),
            cargo: "atendente".to_string(),
            empresa: "petshop1".to_string(),
            empresa_id,
            is_superadmin,
        }
    }

    #[test]
    fn superadmin_acessa_qualquer_empresa() {
        assert!(autorizar_alvo(&principal(Some(2), true), 99).is_ok());
    }

    #[test]
    fn principal_comum_so_acessa_a_propria_empresa() {
        assert!(autorizar_alvo(&principal(Some(2), false), 2).is_ok());
        assert!(matches!(
            autorizar_alvo(&principal(Some(2), false), 3),
            Err(AppError::AcessoNegado)
        ));
    }

    #[test]
    fn principal_sem_empresa_nao_acessa_nada() {
        assert!(matches!(
            autorizar_alvo(&principal(None, false), 1),
            Err(AppError::AcessoNegado)
        ));
    }
}
