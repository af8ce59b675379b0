// src/services/venda_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    config::AppState,
    db::VendaRepository,
    models::venda::{CriarVendaPayload, ItemVendaPayload, Venda, VendaDetalhada},
};

pub struct VendaService {
    app_state: AppState,
}

impl VendaService {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Registra a venda e seus itens em uma única transação.
    pub async fn registrar(
        &self,
        empresa: &str,
        payload: &CriarVendaPayload,
        id_funcionario: i64,
    ) -> Result<VendaDetalhada, AppError> {
        let desconto = payload.desconto.unwrap_or(Decimal::ZERO);
        if desconto < Decimal::ZERO {
            return Err(AppError::RegraDeNegocio(
                "O desconto não pode ser negativo".to_string(),
            ));
        }

        let total = calcular_total(&payload.itens, desconto);

        let pool = self.app_state.router.pool_para(Some(empresa)).await?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = pool.begin().await?;

        let venda = VendaRepository::inserir_venda(
            &mut *tx,
            payload.id_cliente,
            id_funcionario,
            total,
            desconto,
            payload.forma_pagamento.as_deref(),
        )
        .await?;

        let mut itens = Vec::with_capacity(payload.itens.len());
        for item in &payload.itens {
            let inserido = VendaRepository::inserir_item(
                &mut *tx,
                venda.id,
                item.id_produto,
                item.qtd,
                item.preco,
            )
            .await?;
            itens.push(inserido);
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("💰 Venda {} registrada (total: {})", venda.id, venda.total);
        Ok(VendaDetalhada { venda, itens })
    }

    pub async fn buscar(&self, empresa: &str, id: i64) -> Result<VendaDetalhada, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;

        let venda = VendaRepository::buscar(&pool, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Venda"))?;
        let itens = VendaRepository::itens_da_venda(&pool, id).await?;

        Ok(VendaDetalhada { venda, itens })
    }

    pub async fn listar(&self, empresa: &str, limit: i64) -> Result<Vec<Venda>, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;
        VendaRepository::listar_recentes(&pool, limit.clamp(1, 200)).await
    }
}

/// Total da venda em Decimal: soma dos itens menos o desconto, nunca
/// abaixo de zero.
pub fn calcular_total(itens: &[ItemVendaPayload], desconto: Decimal) -> Decimal {
    let subtotal: Decimal = itens
        .iter()
        .map(|item| item.preco * Decimal::from(item.qtd))
        .sum();
    (subtotal - desconto).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id_produto: i64, qtd: i32, preco: &str) -> ItemVendaPayload {
        ItemVendaPayload {
            id_produto,
            qtd,
            preco: preco.parse().unwrap(),
        }
    }

    #[test]
    fn soma_itens_e_aplica_desconto() {
        let itens = vec![item(1, 2, "10.50"), item(2, 1, "5.25")];
        let total = calcular_total(&itens, "1.25".parse().unwrap());
        assert_eq!(total, "25.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn desconto_maior_que_subtotal_trava_em_zero() {
        let itens = vec![item(1, 1, "10.00")];
        let total = calcular_total(&itens, "50.00".parse().unwrap());
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn venda_sem_desconto() {
        let itens = vec![item(1, 3, "33.33")];
        let total = calcular_total(&itens, Decimal::ZERO);
        assert_eq!(total, "99.99".parse::<Decimal>().unwrap());
    }
}
