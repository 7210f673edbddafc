// src/identity.rs

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::user::AuthUser;

/// Carrega o perfil do usuário logado. Na primeira execução o arquivo ainda
/// não existe; um perfil padrão é criado e persistido.
pub async fn load_or_create(path: &Path) -> Result<AuthUser, AppError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let user: AuthUser = serde_json::from_slice(&bytes)
                .with_context(|| format!("perfil inválido em {}", path.display()))?;
            Ok(user)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let user = default_profile();
            save(path, &user).await?;
            tracing::info!("✅ Perfil padrão criado em {}", path.display());
            Ok(user)
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("falha ao ler o perfil em {}", path.display()))
            .into()),
    }
}

async fn save(path: &Path, user: &AuthUser) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("falha ao criar {}", parent.display()))?;
    }
    let body = serde_json::to_vec_pretty(user).context("falha ao serializar o perfil")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("falha ao gravar o perfil em {}", path.display()))?;
    Ok(())
}

fn default_profile() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        name: "João Silva".to_string(),
        email: "joao@email.com".to_string(),
        phone: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn primeira_execucao_cria_e_persiste_o_perfil() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfil.json");

        let criado = load_or_create(&path).await.unwrap();
        assert!(path.exists());

        // Execuções seguintes releem o mesmo perfil.
        let relido = load_or_create(&path).await.unwrap();
        assert_eq!(relido.id, criado.id);
        assert_eq!(relido.name, criado.name);
    }

    #[tokio::test]
    async fn perfil_corrompido_vira_erro_e_nao_e_sobrescrito() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfil.json");
        tokio::fs::write(&path, b"{ nao e json").await.unwrap();

        let result = load_or_create(&path).await;
        assert!(result.is_err());

        let bytes = tokio::fs::read(&path).await.unwrap();
        assert_eq!(bytes, b"{ nao e json");
    }
}
