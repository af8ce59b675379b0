// src/db/empresa_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::db_utils::UpdateParcial;
use crate::common::error::AppError;
use crate::models::empresa::{AtualizarEmpresaPayload, CriarEmpresaPayload, Empresa};

const COLUNAS: &str = "id, codigo, nome, cnpj, telefone, email, endereco, ativo, data_cadastro";

pub struct EmpresaRepository;

impl EmpresaRepository {
    pub async fn buscar_por_id<'e, E>(executor: E, id: i64) -> Result<Option<Empresa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, Empresa>(&format!(
            "SELECT {COLUNAS} FROM empresas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(empresa)
    }

    pub async fn buscar_por_codigo<'e, E>(
        executor: E,
        codigo: &str,
    ) -> Result<Option<Empresa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, Empresa>(&format!(
            "SELECT {COLUNAS} FROM empresas WHERE codigo = $1"
        ))
        .bind(codigo)
        .fetch_optional(executor)
        .await?;

        Ok(empresa)
    }

    pub async fn listar<'e, E>(executor: E) -> Result<Vec<Empresa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresas = sqlx::query_as::<_, Empresa>(&format!(
            "SELECT {COLUNAS} FROM empresas ORDER BY nome"
        ))
        .fetch_all(executor)
        .await?;

        Ok(empresas)
    }

    pub async fn criar<'e, E>(
        executor: E,
        payload: &CriarEmpresaPayload,
    ) -> Result<Empresa, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let empresa = sqlx::query_as::<_, Empresa>(&format!(
            r#"
            INSERT INTO empresas (codigo, nome, cnpj, telefone, email, endereco)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(&payload.codigo)
        .bind(&payload.nome)
        .bind(&payload.cnpj)
        .bind(&payload.telefone)
        .bind(&payload.email)
        .bind(&payload.endereco)
        .fetch_one(executor)
        .await?;

        Ok(empresa)
    }

    pub async fn atualizar<'e, E>(
        executor: E,
        id: i64,
        payload: &AtualizarEmpresaPayload,
    ) -> Result<Option<Empresa>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut up = UpdateParcial::new("empresas");
        up.campo("nome", payload.nome.clone())
            .campo("cnpj", payload.cnpj.clone())
            .campo("telefone", payload.telefone.clone())
            .campo("email", payload.email.clone())
            .campo("endereco", payload.endereco.clone());

        if up.vazia() {
            return Self::buscar_por_id(executor, id).await;
        }

        let mut builder = up.com_id(id);
        builder.push(&format!(" RETURNING {COLUNAS}"));

        let empresa = builder
            .build_query_as::<Empresa>()
            .fetch_optional(executor)
            .await?;

        Ok(empresa)
    }
}
