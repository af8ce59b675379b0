// src/db/agendamento_repo.rs

use sqlx::{Executor, Postgres, QueryBuilder};

use crate::common::error::AppError;
use crate::models::agendamento::{
    Agendamento, AgendamentoDetalhado, ContagemDia, CriarAgendamentoPayload, FiltroAgendamentos,
};

const COLUNAS: &str = "id, id_cliente, id_pet, id_servico, id_funcionario, data_hora, \
                       duracao_estimada, status, observacoes, valor_servico, id_cliente_pacote";

pub struct AgendamentoRepository;

impl AgendamentoRepository {
    pub async fn inserir<'e, E>(
        executor: E,
        payload: &CriarAgendamentoPayload,
        id_funcionario: i64,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(&format!(
            r#"
            INSERT INTO agendamentos
                (id_cliente, id_pet, id_servico, id_funcionario, data_hora,
                 duracao_estimada, status, observacoes, valor_servico, id_cliente_pacote)
            VALUES ($1, $2, $3, $4, $5, $6, 'Agendado', $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(payload.id_cliente)
        .bind(payload.id_pet)
        .bind(payload.id_servico)
        .bind(id_funcionario)
        .bind(payload.data_hora)
        .bind(payload.duracao_estimada)
        .bind(&payload.observacoes)
        .bind(payload.valor_servico)
        .bind(payload.id_cliente_pacote)
        .fetch_one(executor)
        .await?;

        Ok(agendamento)
    }

    pub async fn buscar<'e, E>(executor: E, id: i64) -> Result<Option<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(&format!(
            "SELECT {COLUNAS} FROM agendamentos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(agendamento)
    }

    /// Listagem com filtros opcionais de dia e status, paginada.
    pub async fn listar<'e, E>(
        executor: E,
        filtro: &FiltroAgendamentos,
    ) -> Result<Vec<AgendamentoDetalhado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut builder = QueryBuilder::new(
            "SELECT a.id, a.id_pet, a.id_servico, a.data_hora, a.duracao_estimada, a.status, \
             a.observacoes, a.valor_servico, pe.nome AS nome_pet, c.nome AS nome_cliente, \
             s.nome AS nome_servico \
             FROM agendamentos a \
             LEFT JOIN pets pe ON pe.id = a.id_pet \
             LEFT JOIN clientes c ON c.id = pe.id_cliente \
             LEFT JOIN servicos s ON s.id = a.id_servico \
             WHERE 1 = 1",
        );

        if let Some(data) = filtro.data {
            builder.push(" AND a.data_hora::date = ");
            builder.push_bind(data);
        }
        if let Some(status) = &filtro.status {
            builder.push(" AND a.status = ");
            builder.push_bind(status.clone());
        }

        let limit = filtro.limit.unwrap_or(100).clamp(1, 500);
        let offset = filtro.offset.unwrap_or(0).max(0);

        builder.push(" ORDER BY a.data_hora LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let agendamentos = builder
            .build_query_as::<AgendamentoDetalhado>()
            .fetch_all(executor)
            .await?;

        Ok(agendamentos)
    }

    /// Agenda do dia corrente, na ordem dos horários.
    pub async fn hoje<'e, E>(executor: E) -> Result<Vec<AgendamentoDetalhado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamentos = sqlx::query_as::<_, AgendamentoDetalhado>(
            r#"
            SELECT a.id, a.id_pet, a.id_servico, a.data_hora, a.duracao_estimada, a.status,
                   a.observacoes, a.valor_servico, pe.nome AS nome_pet, c.nome AS nome_cliente,
                   s.nome AS nome_servico
            FROM agendamentos a
            LEFT JOIN pets pe ON pe.id = a.id_pet
            LEFT JOIN clientes c ON c.id = pe.id_cliente
            LEFT JOIN servicos s ON s.id = a.id_servico
            WHERE a.data_hora::date = CURRENT_DATE
            ORDER BY a.data_hora
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(agendamentos)
    }

    /// Total de agendamentos por dia de um mês (para o calendário).
    pub async fn contagem_mes<'e, E>(
        executor: E,
        ano: i32,
        mes: u32,
    ) -> Result<Vec<ContagemDia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contagens = sqlx::query_as::<_, ContagemDia>(
            r#"
            SELECT a.data_hora::date AS dia, COUNT(*)::BIGINT AS total
            FROM agendamentos a
            WHERE EXTRACT(YEAR FROM a.data_hora) = $1
              AND EXTRACT(MONTH FROM a.data_hora) = $2
            GROUP BY dia
            ORDER BY dia
            "#,
        )
        .bind(ano)
        .bind(mes as i32)
        .fetch_all(executor)
        .await?;

        Ok(contagens)
    }

    pub async fn atualizar_status<'e, E>(
        executor: E,
        id: i64,
        status: &str,
    ) -> Result<Option<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agendamento = sqlx::query_as::<_, Agendamento>(&format!(
            "UPDATE agendamentos SET status = $2 WHERE id = $1 RETURNING {COLUNAS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(agendamento)
    }
}
