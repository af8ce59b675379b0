use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Agendamento {
    pub id: i64,
    pub id_cliente: Option<i64>,
    pub id_pet: i64,
    pub id_servico: i64,
    pub id_funcionario: Option<i64>,
    pub data_hora: NaiveDateTime,
    pub duracao_estimada: Option<i32>,
    pub status: String,
    pub observacoes: Option<String>,
    pub valor_servico: Option<Decimal>,
    pub id_cliente_pacote: Option<i64>,
}

// Visão de listagem com os nomes resolvidos por join.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct AgendamentoDetalhado {
    pub id: i64,
    pub id_pet: i64,
    pub id_servico: i64,
    pub data_hora: NaiveDateTime,
    pub duracao_estimada: Option<i32>,
    pub status: String,
    pub observacoes: Option<String>,
    pub valor_servico: Option<Decimal>,
    pub nome_pet: Option<String>,
    pub nome_cliente: Option<String>,
    pub nome_servico: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarAgendamentoPayload {
    #[validate(range(min = 1, message = "Pet inválido"))]
    pub id_pet: i64,
    #[validate(range(min = 1, message = "Serviço inválido"))]
    pub id_servico: i64,
    pub id_cliente: Option<i64>,
    pub data_hora: NaiveDateTime,
    pub duracao_estimada: Option<i32>,
    pub observacoes: Option<String>,
    pub valor_servico: Option<Decimal>,
    /// Quando presente, consome um crédito deste pacote do cliente na
    /// mesma transação do agendamento.
    pub id_cliente_pacote: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarStatusPayload {
    #[validate(length(min = 1, message = "O status é obrigatório"))]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroAgendamentos {
    /// Restringe ao dia informado (AAAA-MM-DD).
    pub data: Option<NaiveDate>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltroCalendario {
    pub ano: i32,
    pub mes: u32,
}

// Total de agendamentos de um dia do mês, para o calendário.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct ContagemDia {
    pub dia: NaiveDate,
    pub total: i64,
}
