use std::time::Duration as StdDuration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use moka::sync::Cache;

use crate::{common::error::AppError, models::auth::Claims};

// Segredos de exemplo/template que nunca podem chegar a produção.
const SEGREDOS_FRACOS: &[&str] = &[
    "sua-chave-secreta-super-segura-mude-isso-em-producao",
    "mudar-em-producao-gerar-com-openssl-rand-hex-32",
    "secret",
    "changeme",
];

const TAMANHO_MINIMO_SEGREDO: usize = 32;
const TTL_CACHE_DECODIFICACAO: StdDuration = StdDuration::from_secs(300);
const CAPACIDADE_CACHE_DECODIFICACAO: u64 = 10_000;

/// Dados do funcionário no momento do login; viram claims do token.
pub struct DadosToken {
    pub login: String,
    pub id_funcionario: Option<i64>,
    pub nome: String,
    pub cargo: String,
    pub empresa: String,
    pub empresa_id: Option<i64>,
}

/// Emissão e decodificação de JWTs (HS256).
///
/// Decodificações bem-sucedidas ficam num cache limitado com TTL; um hit
/// revalida o `exp` antes de ser servido, então um token que expira dentro
/// da janela do cache continua sendo rejeitado.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_minutos: i64,
    empresa_raiz: String,
    cache: Cache<String, Claims>,
}

impl TokenCodec {
    /// Falha na subida quando o segredo é curto ou está na lista de
    /// segredos conhecidos de templates.
    pub fn new(segredo: &str, ttl_minutos: i64, empresa_raiz: &str) -> anyhow::Result<Self> {
        validar_segredo(segredo)?;

        let mut validation = Validation::default();
        // Expiração exata: sem janela de tolerância.
        validation.leeway = 0;

        let cache = Cache::builder()
            .max_capacity(CAPACIDADE_CACHE_DECODIFICACAO)
            .time_to_live(TTL_CACHE_DECODIFICACAO)
            .build();

        Ok(Self {
            encoding: EncodingKey::from_secret(segredo.as_bytes()),
            decoding: DecodingKey::from_secret(segredo.as_bytes()),
            validation,
            ttl_minutos,
            empresa_raiz: empresa_raiz.to_string(),
            cache,
        })
    }

    /// Assina um token com os claims do funcionário. O flag de superadmin é
    /// decidido aqui, uma única vez, e vale pela vida do token.
    pub fn emitir(&self, dados: DadosToken) -> Result<String, AppError> {
        let agora = Utc::now();
        let expira_em = agora + chrono::Duration::minutes(self.ttl_minutos);

        let is_superadmin = eh_superadmin(&dados.cargo, &dados.empresa, &self.empresa_raiz);

        let claims = Claims {
            sub: dados.login,
            id_funcionario: dados.id_funcionario,
            nome: dados.nome,
            cargo: dados.cargo,
            empresa: dados.empresa,
            empresa_id: dados.empresa_id,
            is_superadmin,
            iat: agora.timestamp() as usize,
            exp: expira_em.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Valida assinatura e expiração. Qualquer falha vira `TokenInvalido`,
    /// sem distinguir o motivo para o cliente.
    pub fn decodificar(&self, token: &str) -> Result<Claims, AppError> {
        let agora = Utc::now().timestamp() as usize;

        if let Some(claims) = self.cache.get(token) {
            if claims.exp > agora {
                return Ok(claims);
            }
            self.cache.invalidate(token);
        }

        let dados = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AppError::TokenInvalido)?;

        self.cache.insert(token.to_string(), dados.claims.clone());
        Ok(dados.claims)
    }
}

/// Superadmin = cargo "admin" na empresa raiz. Conjunção estrita.
pub fn eh_superadmin(cargo: &str, empresa: &str, empresa_raiz: &str) -> bool {
    cargo.eq_ignore_ascii_case("admin") && empresa == empresa_raiz
}

fn validar_segredo(segredo: &str) -> anyhow::Result<()> {
    if segredo.len() < TAMANHO_MINIMO_SEGREDO {
        anyhow::bail!(
            "JWT_SECRET muito curto ({} bytes); o mínimo são {} bytes",
            segredo.len(),
            TAMANHO_MINIMO_SEGREDO
        );
    }
    if SEGREDOS_FRACOS.contains(&segredo) {
        anyhow::bail!("JWT_SECRET é um segredo de exemplo; gere um novo com openssl rand -hex 32");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGREDO_TESTE: &str = "um-segredo-de-teste-com-bytes-suficientes-0123456789";

    fn codec() -> TokenCodec {
        TokenCodec::new(SEGREDO_TESTE, 60, "teste").unwrap()
    }

    fn dados(login: &str, cargo: &str, empresa: &str) -> DadosToken {
        DadosToken {
            login: login.to_string(),
            id_funcionario: Some(1),
            nome: "Fulano".to_string(),
            cargo: cargo.to_string(),
            empresa: empresa.to_string(),
            empresa_id: Some(1),
        }
    }

    #[test]
    fn emitir_e_decodificar_roundtrip() {
        let codec = codec();
        let token = codec.emitir(dados("ana", "atendente", "petshop1")).unwrap();
        let claims = codec.decodificar(&token).unwrap();
        assert_eq!(claims.sub, "ana");
        assert_eq!(claims.empresa, "petshop1");
        assert!(!claims.is_superadmin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn segredo_curto_e_rejeitado() {
        assert!(TokenCodec::new("curto", 60, "teste").is_err());
    }

    #[test]
    fn segredo_de_template_e_rejeitado() {
        assert!(
            TokenCodec::new("sua-chave-secreta-super-segura-mude-isso-em-producao", 60, "teste")
                .is_err()
        );
    }

    #[test]
    fn token_adulterado_e_invalido() {
        let codec = codec();
        let token = codec.emitir(dados("ana", "atendente", "petshop1")).unwrap();
        let adulterado = format!("{}x", token);
        assert!(matches!(
            codec.decodificar(&adulterado),
            Err(AppError::TokenInvalido)
        ));
    }

    #[test]
    fn superadmin_exige_cargo_e_empresa_raiz() {
        assert!(eh_superadmin("admin", "teste", "teste"));
        assert!(eh_superadmin("Admin", "teste", "teste"));
        assert!(!eh_superadmin("admin", "petshop1", "teste"));
        assert!(!eh_superadmin("atendente", "teste", "teste"));
    }

    #[test]
    fn flag_de_superadmin_e_gravado_no_token() {
        let codec = codec();
        let token = codec.emitir(dados("root", "admin", "teste")).unwrap();
        assert!(codec.decodificar(&token).unwrap().is_superadmin);
    }

    #[test]
    fn hit_de_cache_revalida_expiracao() {
        // Token emitido já vencido: ttl negativo coloca o exp no passado.
        let codec = TokenCodec::new(SEGREDO_TESTE, -5, "teste").unwrap();
        let token = codec.emitir(dados("ana", "atendente", "petshop1")).unwrap();

        // Simula um token que entrou no cache e expirou dentro da janela.
        let claims = Claims {
            sub: "ana".to_string(),
            id_funcionario: Some(1),
            nome: "Fulano".to_string(),
            cargo: "atendente".to_string(),
            empresa: "petshop1".to_string(),
            empresa_id: Some(1),
            is_superadmin: false,
            iat: (Utc::now().timestamp() - 600) as usize,
            exp: (Utc::now().timestamp() - 300) as usize,
        };
        codec.cache.insert(token.clone(), claims);
        codec.cache.run_pending_tasks();

        assert!(matches!(
            codec.decodificar(&token),
            Err(AppError::TokenInvalido)
        ));
    }
}
