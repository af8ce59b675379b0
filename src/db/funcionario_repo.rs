// src/db/funcionario_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::error::AppError;
use crate::models::auth::Funcionario;

pub struct FuncionarioRepository;

impl FuncionarioRepository {
    /// Busca um funcionário ativo pelo login, no banco da empresa.
    pub async fn buscar_por_login<'e, E>(
        executor: E,
        login: &str,
    ) -> Result<Option<Funcionario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let funcionario = sqlx::query_as::<_, Funcionario>(
            r#"
            SELECT id, nome, login, senha_hash, cargo, ativo
            FROM funcionarios
            WHERE login = $1 AND ativo = TRUE
            "#,
        )
        .bind(login)
        .fetch_optional(executor)
        .await?;

        Ok(funcionario)
    }
}
