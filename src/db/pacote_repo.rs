// src/db/pacote_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};

use crate::common::db_utils::UpdateParcial;
use crate::common::error::AppError;
use crate::models::catalogo::Servico;
use crate::models::pacote::{
    AtualizarPacotePayload, ClientePacote, ClientePacoteResumo, CriarPacotePayload, Pacote,
    PacoteParaConsumo,
};

pub struct PacoteRepository;

impl PacoteRepository {
    pub async fn listar<'e, E>(executor: E) -> Result<Vec<Pacote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pacotes = sqlx::query_as::<_, Pacote>(
            r#"
            SELECT id, nome, descricao, tipo, preco, validade_dias, max_usos, ativo
            FROM pacotes
            WHERE ativo = TRUE
            ORDER BY nome
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(pacotes)
    }

    pub async fn buscar<'e, E>(executor: E, id: i64) -> Result<Option<Pacote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pacote = sqlx::query_as::<_, Pacote>(
            r#"
            SELECT id, nome, descricao, tipo, preco, validade_dias, max_usos, ativo
            FROM pacotes
            WHERE id = $1 AND ativo = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(pacote)
    }

    pub async fn criar<'e, E>(
        executor: E,
        payload: &CriarPacotePayload,
    ) -> Result<Pacote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pacote = sqlx::query_as::<_, Pacote>(
            r#"
            INSERT INTO pacotes (nome, descricao, tipo, preco, validade_dias, max_usos)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, nome, descricao, tipo, preco, validade_dias, max_usos, ativo
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.descricao)
        .bind(&payload.tipo)
        .bind(payload.preco)
        .bind(payload.validade_dias)
        .bind(payload.max_usos)
        .fetch_one(executor)
        .await?;

        Ok(pacote)
    }

    pub async fn associar_servico<'e, E>(
        executor: E,
        id_pacote: i64,
        id_servico: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO pacotes_servicos (id_pacote, id_servico)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id_pacote)
        .bind(id_servico)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn servicos_do_pacote<'e, E>(
        executor: E,
        id_pacote: i64,
    ) -> Result<Vec<Servico>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let servicos = sqlx::query_as::<_, Servico>(
            r#"
            SELECT s.id, s.nome, s.descricao, s.preco, s.duracao_minutos, s.ativo
            FROM servicos s
            JOIN pacotes_servicos ps ON ps.id_servico = s.id
            WHERE ps.id_pacote = $1
            ORDER BY s.nome
            "#,
        )
        .bind(id_pacote)
        .fetch_all(executor)
        .await?;

        Ok(servicos)
    }

    pub async fn atualizar<'e, E>(
        executor: E,
        id: i64,
        payload: &AtualizarPacotePayload,
    ) -> Result<Option<Pacote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut up = UpdateParcial::new("pacotes");
        up.campo("nome", payload.nome.clone())
            .campo("descricao", payload.descricao.clone())
            .campo("preco", payload.preco)
            .campo("validade_dias", payload.validade_dias)
            .campo("max_usos", payload.max_usos);

        if up.vazia() {
            return Self::buscar(executor, id).await;
        }

        let mut builder = up.com_id(id);
        builder.push(" RETURNING id, nome, descricao, tipo, preco, validade_dias, max_usos, ativo");

        let pacote = builder
            .build_query_as::<Pacote>()
            .fetch_optional(executor)
            .await?;

        Ok(pacote)
    }

    pub async fn desativar<'e, E>(executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("UPDATE pacotes SET ativo = FALSE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }

    /// Cria o pacote do cliente com saldo inicial e validade calculados
    /// da definição.
    pub async fn vender<'e, E>(
        executor: E,
        id_pacote: i64,
        id_cliente: i64,
        usos_iniciais: Option<i32>,
        data_validade: Option<NaiveDate>,
    ) -> Result<ClientePacote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente_pacote = sqlx::query_as::<_, ClientePacote>(
            r#"
            INSERT INTO clientes_pacotes (id_cliente, id_pacote, status, usos_restantes, data_validade)
            VALUES ($1, $2, 'ativo', $3, $4)
            RETURNING id, id_cliente, id_pacote, status, usos_restantes, data_compra, data_validade
            "#,
        )
        .bind(id_cliente)
        .bind(id_pacote)
        .bind(usos_iniciais)
        .bind(data_validade)
        .fetch_one(executor)
        .await?;

        Ok(cliente_pacote)
    }

    pub async fn pacotes_do_cliente<'e, E>(
        executor: E,
        id_cliente: i64,
    ) -> Result<Vec<ClientePacoteResumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pacotes = sqlx::query_as::<_, ClientePacoteResumo>(
            r#"
            SELECT cp.id, cp.id_pacote, p.nome AS nome_pacote, p.tipo, cp.status,
                   cp.usos_restantes, cp.data_compra, cp.data_validade
            FROM clientes_pacotes cp
            JOIN pacotes p ON p.id = cp.id_pacote
            WHERE cp.id_cliente = $1
            ORDER BY cp.data_compra DESC
            "#,
        )
        .bind(id_cliente)
        .fetch_all(executor)
        .await?;

        Ok(pacotes)
    }

    /// Trava a linha do pacote do cliente para o consumo (FOR UPDATE).
    /// Só retorna pacotes com status 'ativo'.
    pub async fn travar_para_consumo<'e, E>(
        executor: E,
        id_cliente_pacote: i64,
    ) -> Result<Option<PacoteParaConsumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pacote = sqlx::query_as::<_, PacoteParaConsumo>(
            r#"
            SELECT cp.id, cp.id_pacote, cp.status, cp.usos_restantes, p.tipo
            FROM clientes_pacotes cp
            JOIN pacotes p ON p.id = cp.id_pacote
            WHERE cp.id = $1 AND cp.status = 'ativo'
            FOR UPDATE OF cp
            "#,
        )
        .bind(id_cliente_pacote)
        .fetch_optional(executor)
        .await?;

        Ok(pacote)
    }

    /// Registra o uso no extrato do pacote.
    pub async fn registrar_uso<'e, E>(
        executor: E,
        id_cliente_pacote: i64,
        id_agendamento: Option<i64>,
        id_servico: Option<i64>,
        observacoes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO clientes_pacotes_uso (id_cliente_pacote, id_agendamento, id_servico, observacoes)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id_cliente_pacote)
        .bind(id_agendamento)
        .bind(id_servico)
        .bind(observacoes)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn atualizar_consumo<'e, E>(
        executor: E,
        id_cliente_pacote: i64,
        usos_restantes: Option<i32>,
        status: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE clientes_pacotes
            SET usos_restantes = $2, status = $3
            WHERE id = $1
            "#,
        )
        .bind(id_cliente_pacote)
        .bind(usos_restantes)
        .bind(status)
        .execute(executor)
        .await?;

        Ok(())
    }
}
