use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante carrega um `codigo` estável para o cliente tratar por máquina.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Não autenticado")]
    NaoAutenticado,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("Empresa inativa")]
    EmpresaInativa,

    #[error("Empresa não encontrada")]
    EmpresaNaoEncontrada,

    #[error("{0} não encontrado")]
    NaoEncontrado(&'static str),

    #[error("Pacote inválido ou inativo")]
    PacoteInvalido,

    #[error("Pacote sem créditos disponíveis")]
    SemCreditos,

    #[error("{0}")]
    RegraDeNegocio(String),

    #[error("Falha de conectividade com o banco de dados")]
    Conectividade,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código estável, legível por máquina, devolvido no corpo JSON.
    pub fn codigo(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validacao",
            AppError::NaoAutenticado => "nao_autenticado",
            AppError::TokenInvalido => "token_invalido",
            AppError::CredenciaisInvalidas => "credenciais_invalidas",
            AppError::AcessoNegado => "acesso_negado",
            AppError::EmpresaInativa => "empresa_inativa",
            AppError::EmpresaNaoEncontrada => "empresa_nao_encontrada",
            AppError::NaoEncontrado(_) => "nao_encontrado",
            AppError::PacoteInvalido => "pacote_invalido",
            AppError::SemCreditos => "sem_creditos",
            AppError::RegraDeNegocio(_) => "regra_de_negocio",
            AppError::Conectividade => "conectividade",
            _ => "erro_interno",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::PacoteInvalido
            | AppError::SemCreditos
            | AppError::RegraDeNegocio(_) => StatusCode::BAD_REQUEST,
            AppError::NaoAutenticado
            | AppError::TokenInvalido
            | AppError::CredenciaisInvalidas => StatusCode::UNAUTHORIZED,
            AppError::AcessoNegado | AppError::EmpresaInativa => StatusCode::FORBIDDEN,
            AppError::EmpresaNaoEncontrada | AppError::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::Conectividade => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let codigo = self.codigo();

        // Retorna todos os detalhes da validação, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "codigo": codigo,
                "details": details,
            }));
            return (status, body).into_response();
        }

        let mensagem = match &self {
            AppError::NaoAutenticado => "Autenticação necessária.".to_string(),
            AppError::TokenInvalido => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::CredenciaisInvalidas => "Login ou senha inválidos.".to_string(),
            AppError::AcessoNegado => "Acesso negado a esta empresa.".to_string(),
            AppError::EmpresaInativa => "Empresa inativa.".to_string(),
            AppError::EmpresaNaoEncontrada => "Empresa não encontrada.".to_string(),
            AppError::NaoEncontrado(recurso) => format!("{recurso} não encontrado."),
            AppError::PacoteInvalido => "Pacote do cliente inválido ou inativo.".to_string(),
            AppError::SemCreditos => "Pacote sem créditos disponíveis.".to_string(),
            AppError::RegraDeNegocio(msg) => msg.clone(),
            AppError::Conectividade => {
                "Banco de dados indisponível no momento.".to_string()
            }
            // Todos os outros (DatabaseError, InternalServerError, ...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": mensagem, "codigo": codigo }));
        let mut response = (status, body).into_response();

        // Desafio padrão para respostas 401.
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_de_negocio_sao_estaveis() {
        assert_eq!(AppError::SemCreditos.codigo(), "sem_creditos");
        assert_eq!(AppError::PacoteInvalido.codigo(), "pacote_invalido");
        assert_eq!(AppError::EmpresaInativa.codigo(), "empresa_inativa");
    }

    #[test]
    fn respostas_401_levam_desafio_bearer() {
        let response = AppError::TokenInvalido.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).map(|v| v.to_str().ok()),
            Some(Some("Bearer"))
        );
    }

    #[test]
    fn mapeamento_de_status() {
        assert_eq!(AppError::SemCreditos.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::AcessoNegado.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NaoEncontrado("Cliente").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conectividade.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
