use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

// Linha da tabela `funcionarios` do banco da empresa.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Funcionario {
    pub id: i64,
    pub nome: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub cargo: String,
    pub ativo: bool,
}

/// Claims do JWT emitido no login.
///
/// `empresa` aceita também o nome antigo `empresa_code`, presente em tokens
/// emitidos por versões anteriores do sistema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id_funcionario: Option<i64>,
    pub nome: String,
    pub cargo: String,
    #[serde(alias = "empresa_code")]
    pub empresa: String,
    pub empresa_id: Option<i64>,
    #[serde(default)]
    pub is_superadmin: bool,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "O login é obrigatório"))]
    pub login: String,
    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    pub senha: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RespostaLogin {
    pub access_token: String,
    pub token_type: String,
}

// Principal autenticado, inserido nas extensions da requisição pelo auth_guard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: Option<i64>,
    pub login: String,
    pub nome: String,
    pub cargo: String,
    pub empresa: String,
    pub empresa_id: Option<i64>,
    pub is_superadmin: bool,
}

impl CurrentUser {
    /// Id do funcionário, obrigatório para operações que gravam em seu nome.
    pub fn exigir_id(&self) -> Result<i64, AppError> {
        self.id.ok_or(AppError::NaoAutenticado)
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id_funcionario,
            login: claims.sub,
            nome: claims.nome,
            cargo: claims.cargo,
            empresa: claims.empresa,
            empresa_id: claims.empresa_id,
            is_superadmin: claims.is_superadmin,
        }
    }
}
