// src/services/agendamento_service.rs

use crate::{
    common::error::AppError,
    config::AppState,
    db::AgendamentoRepository,
    models::agendamento::{
        Agendamento, AgendamentoDetalhado, ContagemDia, CriarAgendamentoPayload,
        FiltroAgendamentos,
    },
    services::pacote_ledger::PacoteLedger,
};

/// Estados aceitos para um agendamento.
pub const STATUS_VALIDOS: [&str; 4] = ["Agendado", "Confirmado", "Cancelado", "Concluído"];

pub struct AgendamentoService {
    app_state: AppState,
}

impl AgendamentoService {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Cria o agendamento e, quando um pacote do cliente é informado,
    /// consome o crédito na MESMA transação: ou os dois acontecem, ou
    /// nenhum.
    pub async fn criar(
        &self,
        empresa: &str,
        payload: &CriarAgendamentoPayload,
        id_funcionario: i64,
    ) -> Result<Agendamento, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = pool.begin().await?;

        let agendamento =
            AgendamentoRepository::inserir(&mut *tx, payload, id_funcionario).await?;

        if let Some(id_cliente_pacote) = payload.id_cliente_pacote {
            PacoteLedger::consumir(
                &mut tx,
                id_cliente_pacote,
                Some(agendamento.id),
                Some(payload.id_servico),
                payload.observacoes.as_deref(),
            )
            .await?; // Se falhar aqui, o agendamento inserido acima é desfeito!
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("🐾 Agendamento {} criado", agendamento.id);
        Ok(agendamento)
    }

    pub async fn listar(
        &self,
        empresa: &str,
        filtro: &FiltroAgendamentos,
    ) -> Result<Vec<AgendamentoDetalhado>, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;
        AgendamentoRepository::listar(&pool, filtro).await
    }

    pub async fn hoje(&self, empresa: &str) -> Result<Vec<AgendamentoDetalhado>, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;
        AgendamentoRepository::hoje(&pool).await
    }

    pub async fn calendario(
        &self,
        empresa: &str,
        ano: i32,
        mes: u32,
    ) -> Result<Vec<ContagemDia>, AppError> {
        if !(1..=12).contains(&mes) {
            return Err(AppError::RegraDeNegocio(format!("Mês inválido: {mes}")));
        }
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;
        AgendamentoRepository::contagem_mes(&pool, ano, mes).await
    }

    pub async fn mudar_status(
        &self,
        empresa: &str,
        id: i64,
        status: &str,
    ) -> Result<Agendamento, AppError> {
        validar_status(status)?;

        let pool = self.app_state.router.pool_para(Some(empresa)).await?;
        AgendamentoRepository::atualizar_status(&pool, id, status)
            .await?
            .ok_or(AppError::NaoEncontrado("Agendamento"))
    }
}

pub fn validar_status(status: &str) -> Result<(), AppError> {
    if STATUS_VALIDOS.contains(&status) {
        Ok(())
    } else {
        Err(AppError::RegraDeNegocio(format!(
            "Status inválido: '{status}'. Aceitos: {}",
            STATUS_VALIDOS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_somente_os_quatro_status() {
        for status in STATUS_VALIDOS {
            assert!(validar_status(status).is_ok());
        }
        assert!(validar_status("Pendente").is_err());
        assert!(validar_status("agendado").is_err());
        assert!(validar_status("").is_err());
    }
}
