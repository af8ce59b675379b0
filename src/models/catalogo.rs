use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Produto do catálogo com o estoque agregado das entradas.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub categoria: Option<String>,
    pub preco_venda: Decimal,
    pub preco_custo: Option<Decimal>,
    pub estoque_minimo: Option<i32>,
    pub estoque: Option<i64>,
    pub ativo: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Servico {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Decimal,
    pub duracao_minutos: Option<i32>,
    pub ativo: bool,
}
