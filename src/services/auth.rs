// src/services/auth.rs

use bcrypt::verify;

use crate::{
    common::error::AppError,
    config::AppState,
    db::{EmpresaRepository, FuncionarioRepository},
    services::token_codec::DadosToken,
};

pub struct AuthService {
    app_state: AppState,
}

impl AuthService {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    /// Autentica o funcionário no banco da empresa resolvida e emite o
    /// token com o código da empresa embutido, para os roteamentos
    /// seguintes.
    pub async fn login(
        &self,
        empresa: &str,
        login: &str,
        senha: &str,
    ) -> Result<String, AppError> {
        let pool = self.app_state.router.pool_para(Some(empresa)).await?;

        let funcionario = FuncionarioRepository::buscar_por_login(&pool, login)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        let senha_clone = senha.to_owned();
        let hash_clone = funcionario.senha_hash.clone();

        // Executa a verificação em um thread separado
        let senha_confere = tokio::task::spawn_blocking(move || verify(&senha_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_confere {
            return Err(AppError::CredenciaisInvalidas);
        }

        // O id da empresa vem do cadastro no banco raiz; instalações de
        // banco único podem não ter a linha, e o claim fica ausente.
        let pool_raiz = self.app_state.router.pool_para(None).await?;
        let empresa_row = EmpresaRepository::buscar_por_codigo(&pool_raiz, empresa).await?;

        let token = self.app_state.token_codec.emitir(DadosToken {
            login: funcionario.login.clone(),
            id_funcionario: Some(funcionario.id),
            nome: funcionario.nome,
            cargo: funcionario.cargo,
            empresa: empresa.to_string(),
            empresa_id: empresa_row.map(|e| e.id),
        })?;

        tracing::info!("🔑 Login de '{}' na empresa '{}'", funcionario.login, empresa);
        Ok(token)
    }
}
