// src/cache/file.rs

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::SnapshotCache;
use crate::common::error::AppError;
use crate::models::scheduling::CareRequest;

/// Cache em disco: um arquivo JSON por psicólogo no diretório de dados.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, psychologist_id: Uuid) -> PathBuf {
        // Um snapshot por psicólogo.
        self.dir.join(format!("solicitacoes_{}.json", psychologist_id))
    }
}

#[async_trait]
impl SnapshotCache for FileCache {
    async fn load(&self, psychologist_id: Uuid) -> Result<Option<Vec<CareRequest>>, AppError> {
        let path = self.path_for(psychologist_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::CacheError(e.to_string())),
        };

        // Arquivo corrompido vale o mesmo que cache ausente.
        match serde_json::from_slice(&bytes) {
            Ok(requests) => Ok(Some(requests)),
            Err(e) => {
                tracing::warn!("Cache ilegível em {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(
        &self,
        psychologist_id: Uuid,
        requests: &[CareRequest],
    ) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::CacheError(e.to_string()))?;

        let bytes =
            serde_json::to_vec(requests).map_err(|e| AppError::CacheError(e.to_string()))?;
        tokio::fs::write(self.path_for(psychologist_id), bytes)
            .await
            .map_err(|e| AppError::CacheError(e.to_string()))
    }
}
