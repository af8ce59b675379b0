use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Tutor (dono dos pets) cadastrado na empresa.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub cpf: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: bool,
    pub data_cadastro: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Pet {
    pub id: i64,
    pub id_cliente: i64,
    pub nome: String,
    pub especie: Option<String>,
    pub raca: Option<String>,
    pub sexo: Option<String>,
    pub peso: Option<Decimal>,
    pub cor: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub castrado: Option<bool>,
    pub microchip: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarClientePayload {
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: String,
    pub cpf: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub observacoes: Option<String>,
}

// Atualização parcial: só os campos presentes são gravados.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarClientePayload {
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarPetPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: String,
    pub especie: Option<String>,
    pub raca: Option<String>,
    pub sexo: Option<String>,
    pub peso: Option<Decimal>,
    pub cor: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub castrado: Option<bool>,
    pub microchip: Option<String>,
    pub observacoes: Option<String>,
}
