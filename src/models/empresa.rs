use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Registro de empresa (tenant) no banco raiz.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Empresa {
    pub id: i64,
    pub codigo: String,
    pub nome: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub ativo: bool,
    pub data_cadastro: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarEmpresaPayload {
    #[validate(length(min = 2, message = "O código precisa de ao menos 2 caracteres"))]
    pub codigo: String,
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: String,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarEmpresaPayload {
    #[validate(length(min = 2, message = "O nome precisa de ao menos 2 caracteres"))]
    pub nome: Option<String>,
    pub cnpj: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,
    pub endereco: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistrarBancoPayload {
    #[validate(length(min = 1, message = "A URL do banco é obrigatória"))]
    pub database_url: String,
}
