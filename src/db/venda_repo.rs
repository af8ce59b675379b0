// src/db/venda_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::common::error::AppError;
use crate::models::venda::{Venda, VendaItem};

const COLUNAS: &str = "id, id_cliente, id_funcionario, data_venda, total, desconto, forma_pagamento";

pub struct VendaRepository;

impl VendaRepository {
    pub async fn inserir_venda<'e, E>(
        executor: E,
        id_cliente: Option<i64>,
        id_funcionario: i64,
        total: Decimal,
        desconto: Decimal,
        forma_pagamento: Option<&str>,
    ) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venda = sqlx::query_as::<_, Venda>(&format!(
            r#"
            INSERT INTO vendas (id_cliente, id_funcionario, total, desconto, forma_pagamento)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(id_cliente)
        .bind(id_funcionario)
        .bind(total)
        .bind(desconto)
        .bind(forma_pagamento)
        .fetch_one(executor)
        .await?;

        Ok(venda)
    }

    pub async fn inserir_item<'e, E>(
        executor: E,
        id_venda: i64,
        id_produto: i64,
        qtd: i32,
        preco_unitario: Decimal,
    ) -> Result<VendaItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, VendaItem>(
            r#"
            INSERT INTO vendas_itens (id_venda, id_produto, qtd, preco_unitario)
            VALUES ($1, $2, $3, $4)
            RETURNING id, id_venda, id_produto, qtd, preco_unitario
            "#,
        )
        .bind(id_venda)
        .bind(id_produto)
        .bind(qtd)
        .bind(preco_unitario)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn buscar<'e, E>(executor: E, id: i64) -> Result<Option<Venda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venda = sqlx::query_as::<_, Venda>(&format!(
            "SELECT {COLUNAS} FROM vendas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(venda)
    }

    pub async fn itens_da_venda<'e, E>(executor: E, id_venda: i64) -> Result<Vec<VendaItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = sqlx::query_as::<_, VendaItem>(
            r#"
            SELECT id, id_venda, id_produto, qtd, preco_unitario
            FROM vendas_itens
            WHERE id_venda = $1
            ORDER BY id
            "#,
        )
        .bind(id_venda)
        .fetch_all(executor)
        .await?;

        Ok(itens)
    }

    pub async fn listar_recentes<'e, E>(executor: E, limit: i64) -> Result<Vec<Venda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vendas = sqlx::query_as::<_, Venda>(&format!(
            "SELECT {COLUNAS} FROM vendas ORDER BY data_venda DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(vendas)
    }
}
