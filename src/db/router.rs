// src/db/router.rs

use std::collections::HashMap;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::RwLock;

use crate::common::error::AppError;
use crate::middleware::tenancy::EMPRESA_PADRAO;

/// Opções aplicadas a todos os pools criados pelo roteador.
#[derive(Debug, Clone)]
pub struct OpcoesPool {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for OpcoesPool {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Roteador de conexões: um banco Postgres por empresa.
///
/// Mantém dois registros: os descritores (`codigo -> connection string`),
/// carregados uma vez na subida, e os pools (`codigo -> PgPool`), criados
/// sob demanda no primeiro acesso de cada empresa.
pub struct DatabaseRouter {
    descritores: RwLock<HashMap<String, String>>,
    pools: RwLock<HashMap<String, PgPool>>,
    opcoes: OpcoesPool,
}

impl DatabaseRouter {
    /// Monta o roteador a partir das fontes de configuração, nesta ordem:
    ///
    /// 1. Variável `DATABASES_JSON` (um objeto `{"codigo": "url"}`);
    /// 2. Arquivo `databases.json` ao lado do binário;
    /// 3. Apenas `{"default": DATABASE_URL}`.
    ///
    /// Fontes malformadas são logadas e ignoradas; a entrada `default`
    /// sempre existe ao final.
    pub fn carregar(
        database_url: &str,
        databases_json: Option<&str>,
        arquivo: &str,
        opcoes: OpcoesPool,
    ) -> Self {
        let mut mapa = HashMap::new();

        if let Some(json) = databases_json {
            match parse_descritores(json) {
                Ok(parsed) => mapa = parsed,
                Err(e) => {
                    tracing::warn!("DATABASES_JSON malformado, ignorando: {}", e);
                }
            }
        }

        if mapa.is_empty() {
            match std::fs::read_to_string(arquivo) {
                Ok(conteudo) => match parse_descritores(&conteudo) {
                    Ok(parsed) => mapa = parsed,
                    Err(e) => {
                        tracing::warn!("Arquivo {} malformado, ignorando: {}", arquivo, e);
                    }
                },
                // Arquivo ausente é o caso normal em instalações de banco único.
                Err(_) => {}
            }
        }

        mapa.entry(EMPRESA_PADRAO.to_string())
            .or_insert_with(|| database_url.to_string());

        tracing::info!("🗺️ Roteador de bancos carregado com {} empresa(s)", mapa.len());

        Self {
            descritores: RwLock::new(mapa),
            pools: RwLock::new(HashMap::new()),
            opcoes,
        }
    }

    /// Resolve o pool da empresa. Código ausente ou desconhecido cai no
    /// banco `default`; o pool de cada empresa é construído no máximo uma
    /// vez por processo (checagem dupla sob o write lock).
    pub async fn pool_para(&self, codigo: Option<&str>) -> Result<PgPool, AppError> {
        let chave = self.resolver_chave(codigo).await;

        // Caminho rápido: pool já aquecido.
        if let Some(pool) = self.pools.read().await.get(&chave) {
            return Ok(pool.clone());
        }

        let mut pools = self.pools.write().await;
        if let Some(pool) = pools.get(&chave) {
            return Ok(pool.clone());
        }

        let url = {
            let descritores = self.descritores.read().await;
            match descritores.get(&chave) {
                Some(url) => url.clone(),
                None => {
                    tracing::error!("Nenhum descritor para a empresa '{}'", chave);
                    return Err(AppError::Conectividade);
                }
            }
        };

        let pool = PgPoolOptions::new()
            .max_connections(self.opcoes.max_connections)
            .acquire_timeout(self.opcoes.acquire_timeout)
            .test_before_acquire(true)
            .connect(&url)
            .await
            .map_err(|e| {
                tracing::error!("🔥 Falha ao criar pool da empresa '{}': {:?}", chave, e);
                AppError::Conectividade
            })?;

        tracing::info!("✅ Pool criado para a empresa '{}'", chave);
        pools.insert(chave, pool.clone());
        Ok(pool)
    }

    /// Registra (ou substitui) o descritor de uma empresa em tempo de
    /// execução. Pools já aquecidos não são reconstruídos.
    pub async fn registrar_empresa(&self, codigo: &str, url: &str) {
        let mut descritores = self.descritores.write().await;
        descritores.insert(codigo.to_string(), url.to_string());
        tracing::info!("🏢 Banco registrado para a empresa '{}'", codigo);
    }

    /// Códigos atualmente conhecidos (para diagnóstico).
    pub async fn empresas_conhecidas(&self) -> Vec<String> {
        let mut codigos: Vec<String> = self.descritores.read().await.keys().cloned().collect();
        codigos.sort();
        codigos
    }

    async fn resolver_chave(&self, codigo: Option<&str>) -> String {
        let codigo = codigo.unwrap_or(EMPRESA_PADRAO);
        let descritores = self.descritores.read().await;
        if descritores.contains_key(codigo) {
            codigo.to_string()
        } else {
            EMPRESA_PADRAO.to_string()
        }
    }
}

/// Interpreta um objeto JSON `{"codigo": "url", ...}`.
pub fn parse_descritores(json: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router_de_teste() -> DatabaseRouter {
        DatabaseRouter::carregar(
            "postgres://localhost/principal",
            Some(r#"{"default": "postgres://localhost/principal", "petshop1": "postgres://localhost/petshop1"}"#),
            "nao-existe.json",
            OpcoesPool::default(),
        )
    }

    #[test]
    fn parse_descritores_aceita_objeto_simples() {
        let mapa =
            parse_descritores(r#"{"default": "postgres://a", "loja": "postgres://b"}"#).unwrap();
        assert_eq!(mapa.len(), 2);
        assert_eq!(mapa["loja"], "postgres://b");
    }

    #[test]
    fn parse_descritores_rejeita_json_invalido() {
        assert!(parse_descritores("nao é json").is_err());
        assert!(parse_descritores(r#"{"loja": 42}"#).is_err());
    }

    #[tokio::test]
    async fn json_malformado_cai_no_database_url() {
        let router = DatabaseRouter::carregar(
            "postgres://localhost/principal",
            Some("{{{"),
            "nao-existe.json",
            OpcoesPool::default(),
        );
        assert_eq!(router.empresas_conhecidas().await, vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn codigo_desconhecido_resolve_para_default() {
        let router = router_de_teste();
        assert_eq!(router.resolver_chave(Some("inexistente")).await, "default");
        assert_eq!(router.resolver_chave(None).await, "default");
        assert_eq!(router.resolver_chave(Some("petshop1")).await, "petshop1");
    }

    #[tokio::test]
    async fn registrar_empresa_fica_visivel() {
        let router = router_de_teste();
        assert_eq!(router.resolver_chave(Some("nova")).await, "default");

        router
            .registrar_empresa("nova", "postgres://localhost/nova")
            .await;

        assert_eq!(router.resolver_chave(Some("nova")).await, "nova");
        assert!(router
            .empresas_conhecidas()
            .await
            .contains(&"nova".to_string()));
    }
}
