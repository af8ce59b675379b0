use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::catalogo::Servico;

// Definição de pacote vendável: créditos (N usos) ou combo (uso único).
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Pacote {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo: String,
    pub preco: Decimal,
    pub validade_dias: Option<i32>,
    pub max_usos: Option<i32>,
    pub ativo: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PacoteDetalhado {
    #[serde(flatten)]
    pub pacote: Pacote,
    pub servicos: Vec<Servico>,
}

// Pacote comprado por um cliente, com saldo próprio.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct ClientePacote {
    pub id: i64,
    pub id_cliente: i64,
    pub id_pacote: i64,
    pub status: String,
    pub usos_restantes: Option<i32>,
    pub data_compra: Option<DateTime<Utc>>,
    pub data_validade: Option<NaiveDate>,
}

// Visão de listagem: o pacote do cliente junto com a definição.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct ClientePacoteResumo {
    pub id: i64,
    pub id_pacote: i64,
    pub nome_pacote: String,
    pub tipo: String,
    pub status: String,
    pub usos_restantes: Option<i32>,
    pub data_compra: Option<DateTime<Utc>>,
    pub data_validade: Option<NaiveDate>,
}

// Linha travada (FOR UPDATE) durante o consumo de um crédito.
#[derive(Debug, Clone, FromRow)]
pub struct PacoteParaConsumo {
    pub id: i64,
    pub id_pacote: i64,
    pub status: String,
    pub usos_restantes: Option<i32>,
    pub tipo: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarPacotePayload {
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo: String,
    pub preco: Decimal,
    pub validade_dias: Option<i32>,
    pub max_usos: Option<i32>,
    #[serde(default)]
    pub servicos: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarPacotePayload {
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<Decimal>,
    pub validade_dias: Option<i32>,
    pub max_usos: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VenderPacotePayload {
    #[validate(range(min = 1, message = "Cliente inválido"))]
    pub id_cliente: i64,
}
