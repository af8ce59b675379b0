// src/db/cliente_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::db_utils::UpdateParcial;
use crate::common::error::AppError;
use crate::models::cliente::{
    AtualizarClientePayload, Cliente, CriarClientePayload, CriarPetPayload, Pet,
};

pub struct ClienteRepository;

impl ClienteRepository {
    pub async fn listar<'e, E>(
        executor: E,
        busca: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT id, nome, cpf, telefone, email, endereco, observacoes, ativo, data_cadastro
            FROM clientes
            WHERE ativo = TRUE
              AND ($1::TEXT IS NULL OR nome ILIKE '%' || $1 || '%')
            ORDER BY nome
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(busca)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(clientes)
    }

    pub async fn buscar<'e, E>(executor: E, id: i64) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT id, nome, cpf, telefone, email, endereco, observacoes, ativo, data_cadastro
            FROM clientes
            WHERE id = $1 AND ativo = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(cliente)
    }

    pub async fn criar<'e, E>(
        executor: E,
        payload: &CriarClientePayload,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nome, cpf, telefone, email, endereco, observacoes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, nome, cpf, telefone, email, endereco, observacoes, ativo, data_cadastro
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.cpf)
        .bind(&payload.telefone)
        .bind(&payload.email)
        .bind(&payload.endereco)
        .bind(&payload.observacoes)
        .fetch_one(executor)
        .await?;

        Ok(cliente)
    }

    /// Atualização parcial: apenas os campos presentes no payload entram
    /// no UPDATE, sempre via placeholders.
    pub async fn atualizar<'e, E>(
        executor: E,
        id: i64,
        payload: &AtualizarClientePayload,
    ) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut up = UpdateParcial::new("clientes");
        up.campo("nome", payload.nome.clone())
            .campo("cpf", payload.cpf.clone())
            .campo("telefone", payload.telefone.clone())
            .campo("email", payload.email.clone())
            .campo("endereco", payload.endereco.clone())
            .campo("observacoes", payload.observacoes.clone());

        if up.vazia() {
            return Self::buscar(executor, id).await;
        }

        let mut builder = up.com_id(id);
        builder.push(" RETURNING id, nome, cpf, telefone, email, endereco, observacoes, ativo, data_cadastro");

        let cliente = builder
            .build_query_as::<Cliente>()
            .fetch_optional(executor)
            .await?;

        Ok(cliente)
    }

    /// Soft delete: o cliente sai das listagens mas o histórico permanece.
    pub async fn desativar<'e, E>(executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("UPDATE clientes SET ativo = FALSE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar_pets<'e, E>(executor: E, id_cliente: i64) -> Result<Vec<Pet>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pets = sqlx::query_as::<_, Pet>(
            r#"
            SELECT id, id_cliente, nome, especie, raca, sexo, peso, cor,
                   data_nascimento, castrado, microchip, observacoes, ativo
            FROM pets
            WHERE id_cliente = $1 AND ativo = TRUE
            ORDER BY nome
            "#,
        )
        .bind(id_cliente)
        .fetch_all(executor)
        .await?;

        Ok(pets)
    }

    pub async fn criar_pet<'e, E>(
        executor: E,
        id_cliente: i64,
        payload: &CriarPetPayload,
    ) -> Result<Pet, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pets (id_cliente, nome, especie, raca, sexo, peso, cor,
                              data_nascimento, castrado, microchip, observacoes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, id_cliente, nome, especie, raca, sexo, peso, cor,
                      data_nascimento, castrado, microchip, observacoes, ativo
            "#,
        )
        .bind(id_cliente)
        .bind(&payload.nome)
        .bind(&payload.especie)
        .bind(&payload.raca)
        .bind(&payload.sexo)
        .bind(payload.peso)
        .bind(&payload.cor)
        .bind(payload.data_nascimento)
        .bind(payload.castrado)
        .bind(&payload.microchip)
        .bind(&payload.observacoes)
        .fetch_one(executor)
        .await?;

        Ok(pet)
    }
}
