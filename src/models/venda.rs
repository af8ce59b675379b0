use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Venda {
    pub id: i64,
    pub id_cliente: Option<i64>,
    pub id_funcionario: Option<i64>,
    pub data_venda: DateTime<Utc>,
    pub total: Decimal,
    pub desconto: Decimal,
    pub forma_pagamento: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct VendaItem {
    pub id: i64,
    pub id_venda: i64,
    pub id_produto: i64,
    pub qtd: i32,
    pub preco_unitario: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendaDetalhada {
    #[serde(flatten)]
    pub venda: Venda,
    pub itens: Vec<VendaItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemVendaPayload {
    #[validate(range(min = 1, message = "Produto inválido"))]
    pub id_produto: i64,
    #[validate(range(min = 1, message = "A quantidade mínima é 1"))]
    pub qtd: i32,
    pub preco: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarVendaPayload {
    pub id_cliente: Option<i64>,
    pub desconto: Option<Decimal>,
    pub forma_pagamento: Option<String>,
    #[validate(length(min = 1, message = "A venda precisa de ao menos um item"))]
    #[validate(nested)]
    pub itens: Vec<ItemVendaPayload>,
}
