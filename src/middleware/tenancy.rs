// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
const EMPRESA_HEADER: &str = "x-empresa";

/// Código de empresa usado quando a requisição não identifica nenhuma.
pub const EMPRESA_PADRAO: &str = "default";

// O extrator de tenant.
// Ele carrega o código da empresa cujo banco a requisição quer acessar.
#[derive(Debug, Clone)]
pub struct EmpresaCode(pub String);

impl<S> FromRequestParts<S> for EmpresaCode
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A resolução nunca falha: na pior hipótese cai no código padrão.
        Ok(EmpresaCode(resolver_empresa(&parts.headers)))
    }
}

/// Resolve o código da empresa a partir dos cabeçalhos, nesta ordem:
///
/// 1. Cabeçalho `X-Empresa` (aceita variações de caixa; espaços são
///    aparados; vazio não conta).
/// 2. Claim `empresa`/`empresa_code` embutido no bearer token, lido sem
///    verificar assinatura — um token inválido não derruba a resolução,
///    a autenticação o rejeita depois.
/// 3. O código sentinela `"default"`.
pub fn resolver_empresa(headers: &HeaderMap) -> String {
    if let Some(valor) = headers.get(EMPRESA_HEADER).and_then(|v| v.to_str().ok()) {
        let valor = valor.trim();
        if !valor.is_empty() {
            return valor.to_string();
        }
    }

    if let Some(token) = bearer_token(headers) {
        if let Some(empresa) = empresa_do_token(token) {
            return empresa;
        }
    }

    EMPRESA_PADRAO.to_string()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// Claims mínimos para a resolução de tenant; o resto do token é ignorado.
#[derive(Deserialize)]
struct ClaimsEmpresa {
    #[serde(alias = "empresa_code")]
    empresa: String,
}

fn empresa_do_token(token: &str) -> Option<String> {
    let mut validation = Validation::default();
    // Só queremos espiar o claim de empresa; assinatura e expiração são
    // responsabilidade do TokenCodec, mais adiante no pipeline.
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<ClaimsEmpresa>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|dados| dados.claims.empresa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token_com_claims(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"qualquer-segredo-serve-para-este-teste"),
        )
        .unwrap()
    }

    #[test]
    fn cabecalho_tem_prioridade_sobre_token() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Empresa", HeaderValue::from_static("petshop1"));
        let token = token_com_claims(json!({ "empresa": "outra", "exp": 4_000_000_000u64 }));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        assert_eq!(resolver_empresa(&headers), "petshop1");
    }

    #[test]
    fn cabecalho_e_aparado_e_vazio_nao_conta() {
        let mut headers = HeaderMap::new();
        headers.insert("x-empresa", HeaderValue::from_static("  petshop2  "));
        assert_eq!(resolver_empresa(&headers), "petshop2");

        let mut headers = HeaderMap::new();
        headers.insert("x-empresa", HeaderValue::from_static("   "));
        assert_eq!(resolver_empresa(&headers), EMPRESA_PADRAO);
    }

    #[test]
    fn claim_do_token_e_usado_sem_cabecalho() {
        let mut headers = HeaderMap::new();
        let token = token_com_claims(json!({ "empresa": "petshop3", "exp": 4_000_000_000u64 }));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        assert_eq!(resolver_empresa(&headers), "petshop3");
    }

    #[test]
    fn nome_antigo_do_claim_tambem_vale() {
        let mut headers = HeaderMap::new();
        let token =
            token_com_claims(json!({ "empresa_code": "petshop4", "exp": 4_000_000_000u64 }));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        assert_eq!(resolver_empresa(&headers), "petshop4");
    }

    #[test]
    fn token_ilegivel_cai_no_padrao() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_static("Bearer nao-e-um-jwt"),
        );
        assert_eq!(resolver_empresa(&headers), EMPRESA_PADRAO);
    }

    #[test]
    fn sem_nada_cai_no_padrao() {
        assert_eq!(resolver_empresa(&HeaderMap::new()), EMPRESA_PADRAO);
    }
}
