// src/services/pacote_ledger.rs

use sqlx::{Postgres, Transaction};

use crate::common::error::AppError;
use crate::db::PacoteRepository;

pub const TIPO_CREDITOS: &str = "creditos";
pub const TIPO_COMBO: &str = "combo";
pub const STATUS_ATIVO: &str = "ativo";
pub const STATUS_USADO: &str = "usado";

/// Novo saldo e novo status após um consumo.
#[derive(Debug, PartialEq, Eq)]
pub struct DecisaoConsumo {
    pub usos_restantes: Option<i32>,
    pub status: &'static str,
}

/// Regra pura de consumo de um pacote:
///
/// - `creditos`: exige saldo positivo e debita exatamente 1; chegar a zero
///   marca o pacote como usado.
/// - `combo`: marca como usado no primeiro consumo; o contador é ignorado.
pub fn decidir_consumo(
    tipo: &str,
    usos_restantes: Option<i32>,
) -> Result<DecisaoConsumo, AppError> {
    match tipo {
        TIPO_COMBO => Ok(DecisaoConsumo {
            usos_restantes,
            status: STATUS_USADO,
        }),
        TIPO_CREDITOS => {
            let usos = usos_restantes.unwrap_or(0);
            if usos <= 0 {
                return Err(AppError::SemCreditos);
            }
            let restantes = usos - 1;
            Ok(DecisaoConsumo {
                usos_restantes: Some(restantes),
                status: if restantes == 0 { STATUS_USADO } else { STATUS_ATIVO },
            })
        }
        _ => Err(AppError::PacoteInvalido),
    }
}

pub struct PacoteLedger;

impl PacoteLedger {
    /// Consome um uso do pacote do cliente, dentro da transação do chamador.
    ///
    /// A linha do pacote é travada (`FOR UPDATE`): dois consumos simultâneos
    /// do mesmo pacote serializam, e o segundo já enxerga o saldo debitado.
    /// Qualquer erro aborta a transação inteira — o registro de uso nunca
    /// sobrevive a um consumo recusado.
    pub async fn consumir(
        tx: &mut Transaction<'_, Postgres>,
        id_cliente_pacote: i64,
        id_agendamento: Option<i64>,
        id_servico: Option<i64>,
        observacoes: Option<&str>,
    ) -> Result<(), AppError> {
        let pacote = PacoteRepository::travar_para_consumo(&mut **tx, id_cliente_pacote)
            .await?
            .ok_or(AppError::PacoteInvalido)?;

        PacoteRepository::registrar_uso(
            &mut **tx,
            id_cliente_pacote,
            id_agendamento,
            id_servico,
            observacoes,
        )
        .await?;

        let decisao = decidir_consumo(&pacote.tipo, pacote.usos_restantes)?;

        PacoteRepository::atualizar_consumo(
            &mut **tx,
            id_cliente_pacote,
            decisao.usos_restantes,
            decisao.status,
        )
        .await?;

        tracing::info!(
            "📦 Pacote {} consumido (status: {}, saldo: {:?})",
            id_cliente_pacote,
            decisao.status,
            decisao.usos_restantes
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creditos_debitam_um_por_vez() {
        let decisao = decidir_consumo(TIPO_CREDITOS, Some(3)).unwrap();
        assert_eq!(decisao.usos_restantes, Some(2));
        assert_eq!(decisao.status, STATUS_ATIVO);
    }

    #[test]
    fn ultimo_credito_marca_como_usado() {
        let decisao = decidir_consumo(TIPO_CREDITOS, Some(1)).unwrap();
        assert_eq!(decisao.usos_restantes, Some(0));
        assert_eq!(decisao.status, STATUS_USADO);
    }

    #[test]
    fn sem_saldo_e_recusado() {
        assert!(matches!(
            decidir_consumo(TIPO_CREDITOS, Some(0)),
            Err(AppError::SemCreditos)
        ));
        assert!(matches!(
            decidir_consumo(TIPO_CREDITOS, None),
            Err(AppError::SemCreditos)
        ));
    }

    #[test]
    fn combo_e_usado_no_primeiro_consumo() {
        let decisao = decidir_consumo(TIPO_COMBO, Some(99)).unwrap();
        assert_eq!(decisao.status, STATUS_USADO);
        assert_eq!(decisao.usos_restantes, Some(99));

        let decisao = decidir_consumo(TIPO_COMBO, None).unwrap();
        assert_eq!(decisao.status, STATUS_USADO);
    }

    #[test]
    fn tipo_desconhecido_e_invalido() {
        assert!(matches!(
            decidir_consumo("assinatura", Some(3)),
            Err(AppError::PacoteInvalido)
        ));
    }

    #[test]
    fn sequencia_completa_de_creditos() {
        // 3 -> 2 -> 1 -> 0 (usado) -> erro
        let mut saldo = Some(3);
        for esperado in [2, 1, 0] {
            let decisao = decidir_consumo(TIPO_CREDITOS, saldo).unwrap();
            assert_eq!(decisao.usos_restantes, Some(esperado));
            saldo = decisao.usos_restantes;
        }
        assert!(decidir_consumo(TIPO_CREDITOS, saldo).is_err());
    }
}
