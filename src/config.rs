// src/config.rs

use anyhow::Context;
use std::{env, sync::Arc, time::Duration};

use crate::db::router::{DatabaseRouter, OpcoesPool};
use crate::services::token_codec::TokenCodec;

/// Configuração lida do ambiente (e de um `.env`, quando presente).
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_minutos: i64,
    pub empresa_raiz: String,
    pub databases_json: Option<String>,
    pub databases_file: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn carregar() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_minutos: var_ou("JWT_EXPIRACAO_MINUTOS", 480)?,
            empresa_raiz: env::var("EMPRESA_RAIZ").unwrap_or_else(|_| "teste".to_string()),
            databases_json: env::var("DATABASES_JSON").ok(),
            databases_file: env::var("DATABASES_FILE")
                .unwrap_or_else(|_| "databases.json".to_string()),
            db_max_connections: var_ou("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout_secs: var_ou("DB_ACQUIRE_TIMEOUT_SECS", 3)?,
            request_timeout_secs: var_ou("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }
}

fn var_ou<T>(nome: &str, padrao: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(nome) {
        Ok(valor) => valor
            .parse()
            .with_context(|| format!("{nome} inválida: '{valor}'")),
        Err(_) => Ok(padrao),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub router: Arc<DatabaseRouter>,
    pub token_codec: Arc<TokenCodec>,
}

impl AppState {
    // Carrega as configurações, valida o segredo e aquece o banco padrão.
    pub async fn new() -> anyhow::Result<Self> {
        let settings = Settings::carregar()?;

        let token_codec = Arc::new(TokenCodec::new(
            &settings.jwt_secret,
            settings.jwt_ttl_minutos,
            &settings.empresa_raiz,
        )?);

        let router = Arc::new(DatabaseRouter::carregar(
            &settings.database_url,
            settings.databases_json.as_deref(),
            &settings.databases_file,
            OpcoesPool {
                max_connections: settings.db_max_connections,
                acquire_timeout: Duration::from_secs(settings.db_acquire_timeout_secs),
            },
        ));

        // Se o banco padrão não sobe, a aplicação não deve subir.
        let pool = router.pool_para(None).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self {
            settings,
            router,
            token_codec,
        })
    }
}
