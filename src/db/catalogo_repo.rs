// src/db/catalogo_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::error::AppError;
use crate::models::catalogo::{Produto, Servico};

pub struct CatalogoRepository;

impl CatalogoRepository {
    /// Produtos ativos com o estoque agregado dos movimentos.
    pub async fn listar_produtos<'e, E>(executor: E) -> Result<Vec<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT p.id, p.nome, p.descricao, p.categoria, p.preco_venda, p.preco_custo,
                   p.estoque_minimo, COALESCE(SUM(m.quantidade), 0)::BIGINT AS estoque, p.ativo
            FROM produtos p
            LEFT JOIN estoque_movimentos m ON m.id_produto = p.id
            WHERE p.ativo = TRUE
            GROUP BY p.id
            ORDER BY p.nome
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(produtos)
    }

    pub async fn listar_servicos<'e, E>(executor: E) -> Result<Vec<Servico>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let servicos = sqlx::query_as::<_, Servico>(
            r#"
            SELECT id, nome, descricao, preco, duracao_minutos, ativo
            FROM servicos
            WHERE ativo = TRUE
            ORDER BY nome
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(servicos)
    }
}
